use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NgramError, NgramResult};

/// Largest n-gram order accepted by `BuildConfig::validate`.
pub const MAX_ORDER: usize = 16;

/// Orders built when nothing else is configured.
pub const DEFAULT_ORDERS: [usize; 4] = [1, 2, 3, 4];

/// Parameters of a model build.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```json
/// { "orders": [1, 2], "parallel_counting": true }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BuildConfig {
	/// N-gram orders to build, in output order.
	pub orders: Vec<usize>,

	/// Builds each order on its own thread.
	pub parallel_orders: bool,

	/// Splits the counting of a single order across worker threads.
	pub parallel_counting: bool,

	/// Chunks per CPU when `parallel_counting` is set.
	pub chunk_factor: usize,
}

impl Default for BuildConfig {
	fn default() -> Self {
		Self {
			orders: DEFAULT_ORDERS.to_vec(),
			parallel_orders: false,
			parallel_counting: false,
			chunk_factor: 8,
		}
	}
}

impl BuildConfig {
	/// Reads a JSON config file and validates it.
	///
	/// # Errors
	/// Returns an error if the file cannot be read, is not valid JSON, or
	/// fails `validate`.
	pub fn from_file<P: AsRef<Path>>(path: P) -> NgramResult<Self> {
		let content = fs::read_to_string(path)?;
		let config: Self = serde_json::from_str(&content)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks that the orders and chunking parameters are usable.
	pub fn validate(&self) -> NgramResult<()> {
		if self.orders.is_empty() {
			return Err(NgramError::Config("At least one n-gram order is required".to_owned()));
		}
		if let Some(&order) = self.orders.iter().find(|&&n| n == 0 || n > MAX_ORDER) {
			return Err(NgramError::InvalidOrder(order));
		}
		if self.chunk_factor == 0 {
			return Err(NgramError::Config("chunk_factor must be >= 1".to_owned()));
		}
		Ok(())
	}

	/// Number of chunks used by partition-then-merge counting.
	///
	/// Saturates instead of overflowing on huge factors.
	pub fn chunks(&self) -> usize {
		if self.parallel_counting {
			num_cpus::get().saturating_mul(self.chunk_factor)
		} else {
			1
		}
	}
}
