use std::fmt;
use std::time::Duration;

use log::info;

/// A step of the build pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
	Tokenize,
	Frequency(usize),
	Distribution(usize),
	Persist(usize),
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Stage::Tokenize => write!(f, "tokenization"),
			Stage::Frequency(n) => write!(f, "{}-gram frequency table", n),
			Stage::Distribution(n) => write!(f, "{}-gram probability table", n),
			Stage::Persist(n) => write!(f, "{}-gram persistence", n),
		}
	}
}

/// A finished stage and how long it took.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressEvent {
	pub stage: Stage,
	pub elapsed: Duration,
}

/// Receiver of pipeline progress.
///
/// The pipeline only reports events; formatting them is up to the sink.
/// Sinks are shared between order threads, hence `Sync`.
pub trait Progress: Sync {
	fn on_stage(&self, event: ProgressEvent);
}

/// Discards every event.
pub struct NoProgress;

impl Progress for NoProgress {
	fn on_stage(&self, _event: ProgressEvent) {}
}

/// Forwards events to the `log` facade at info level.
pub struct LogProgress;

impl Progress for LogProgress {
	fn on_stage(&self, event: ProgressEvent) {
		info!("{} finished in {:.3}s", event.stage, event.elapsed.as_secs_f64());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stages_read_naturally() {
		assert_eq!(Stage::Frequency(2).to_string(), "2-gram frequency table");
		assert_eq!(Stage::Tokenize.to_string(), "tokenization");
	}
}
