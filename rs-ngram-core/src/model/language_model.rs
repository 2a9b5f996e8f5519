use std::panic;
use std::thread;
use std::time::Instant;

use log::debug;

use super::corpus::Corpus;
use super::distribution::DistributionTable;
use super::frequency::FrequencyTable;
use super::ngrams::ngrams;
use super::tokenizer::Tokenizer;
use crate::config::BuildConfig;
use crate::error::{NgramError, NgramResult};
use crate::progress::{Progress, ProgressEvent, Stage};

/// The distribution tables of several n-gram orders built from one corpus.
///
/// Tables are stored in the order of `BuildConfig::orders`, which is
/// `1, 2, 3, 4` by default, and are never modified after the build.
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageModel {
	tables: Vec<DistributionTable>,
}

impl LanguageModel {
	/// Builds one distribution table per configured order.
	///
	/// Each order is a full, independent pass over the corpus. With
	/// `parallel_orders` every order runs on its own thread; the tables
	/// come back in configured order either way.
	///
	/// # Errors
	/// Returns an error if the configuration is invalid or if a table
	/// cannot be built.
	pub fn build(corpus: &Corpus, config: &BuildConfig, progress: &dyn Progress) -> NgramResult<Self> {
		config.validate()?;
		let chunks = config.chunks();

		let tables = if config.parallel_orders {
			thread::scope(|scope| {
				let handles: Vec<_> = config
					.orders
					.iter()
					.map(|&n| scope.spawn(move || Self::build_order(corpus, n, chunks, progress)))
					.collect();

				handles
					.into_iter()
					.map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
					.collect::<NgramResult<Vec<_>>>()
			})?
		} else {
			config
				.orders
				.iter()
				.map(|&n| Self::build_order(corpus, n, chunks, progress))
				.collect::<NgramResult<Vec<_>>>()?
		};

		Ok(Self { tables })
	}

	/// Tokenizes `lines` and builds the model from the resulting corpus.
	pub fn from_text<I, S>(
		tokenizer: &Tokenizer,
		lines: I,
		config: &BuildConfig,
		progress: &dyn Progress,
	) -> NgramResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let start = Instant::now();
		let corpus = tokenizer.tokenize_text(lines);
		progress.on_stage(ProgressEvent { stage: Stage::Tokenize, elapsed: start.elapsed() });
		Self::build(&corpus, config, progress)
	}

	/// Counts then normalizes a single order.
	fn build_order(
		corpus: &Corpus,
		n: usize,
		chunks: usize,
		progress: &dyn Progress,
	) -> NgramResult<DistributionTable> {
		if n == 0 {
			return Err(NgramError::InvalidOrder(n));
		}

		let start = Instant::now();
		let flat = ngrams(corpus, n);
		debug!("{} {}-grams extracted", flat.len(), n);
		let frequencies = if chunks > 1 {
			FrequencyTable::from_ngrams_parallel(&flat, n, chunks)?
		} else {
			FrequencyTable::from_ngrams(&flat, n)
		};
		progress.on_stage(ProgressEvent { stage: Stage::Frequency(n), elapsed: start.elapsed() });

		let start = Instant::now();
		let table = DistributionTable::from_frequencies(&frequencies)?;
		progress.on_stage(ProgressEvent { stage: Stage::Distribution(n), elapsed: start.elapsed() });

		Ok(table)
	}

	/// Wraps tables that were built or loaded elsewhere.
	pub fn from_tables(tables: Vec<DistributionTable>) -> Self {
		Self { tables }
	}

	/// Orders of the stored tables, in storage order.
	pub fn orders(&self) -> impl Iterator<Item = usize> + '_ {
		self.tables.iter().map(DistributionTable::order)
	}

	/// The table of order `n`, if it was built.
	pub fn table(&self, n: usize) -> Option<&DistributionTable> {
		self.tables.iter().find(|table| table.order() == n)
	}

	pub fn tables(&self) -> &[DistributionTable] {
		&self.tables
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::tokenizer::Alphabet;
	use crate::progress::NoProgress;
	use std::sync::Mutex;

	#[derive(Default)]
	struct Recorder {
		stages: Mutex<Vec<Stage>>,
	}

	impl Progress for Recorder {
		fn on_stage(&self, event: ProgressEvent) {
			self.stages.lock().unwrap().push(event.stage);
		}
	}

	fn tokenizer() -> Tokenizer {
		Tokenizer::new(Alphabet::default()).unwrap()
	}

	#[test]
	fn builds_the_four_default_orders() {
		let model = LanguageModel::from_text(&tokenizer(), ["the cat sat"], &BuildConfig::default(), &NoProgress).unwrap();
		assert_eq!(model.orders().collect::<Vec<_>>(), vec![1, 2, 3, 4]);

		let unigrams = model.table(1).unwrap();
		assert_eq!(unigrams.get("<s>").unwrap().entries(), &[("the".to_owned(), 1.0)]);
		// flat bigrams: "<s> the", "the cat", "cat sat", "sat </s>"
		let bigrams = model.table(2).unwrap();
		assert_eq!(bigrams.get("<s> the").unwrap().select(0.5), Some("cat sat"));
		assert_eq!(bigrams.len(), 2);
		// three trigrams and two 4-grams: no n-gram has a follower n positions ahead
		assert!(model.table(3).unwrap().is_empty());
		assert!(model.table(4).unwrap().is_empty());
	}

	#[test]
	fn reports_every_stage_in_order() {
		let recorder = Recorder::default();
		let config = BuildConfig { orders: vec![1, 2], ..Default::default() };
		LanguageModel::from_text(&tokenizer(), ["a dog", "a cat"], &config, &recorder).unwrap();
		assert_eq!(*recorder.stages.lock().unwrap(), vec![
			Stage::Tokenize,
			Stage::Frequency(1),
			Stage::Distribution(1),
			Stage::Frequency(2),
			Stage::Distribution(2),
		]);
	}

	#[test]
	fn invalid_config_fails_before_building() {
		let config = BuildConfig { orders: vec![0], ..Default::default() };
		let result = LanguageModel::build(&Corpus::new(), &config, &NoProgress);
		assert!(matches!(result, Err(NgramError::InvalidOrder(0))));
	}
}
