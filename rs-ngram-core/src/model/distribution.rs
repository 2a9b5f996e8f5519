use std::collections::HashMap;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::frequency::{FollowerCounts, FrequencyTable};
use crate::error::{NgramError, NgramResult};

/// Followers of one context paired with their running probability.
///
/// The probability increment of each entry is `count / total`; entries are
/// kept in the follower order of the counts they were built from, so the
/// list is non-decreasing and ends at 1.0 give or take float drift.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CumulativeList {
	entries: Vec<(String, f64)>,
}

impl CumulativeList {
	/// Builds the running distribution of a follower set.
	///
	/// No correction is applied after accumulation: the last value is
	/// whatever the float sum gives.
	///
	/// # Errors
	/// Returns `EmptyContext` if the set has no occurrence at all.
	pub fn from_counts(counts: &FollowerCounts) -> NgramResult<Self> {
		let total = counts.total();
		if total == 0 {
			return Err(NgramError::EmptyContext(counts.context().to_owned()));
		}
		let total = total as f64;

		let mut cumulative = 0.0;
		let entries = counts
			.iter()
			.map(|(follower, count)| {
				cumulative += count as f64 / total;
				(follower.to_owned(), cumulative)
			})
			.collect();

		Ok(Self { entries })
	}

	pub fn entries(&self) -> &[(String, f64)] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Cumulative probability of the last entry (~1.0).
	pub fn last_probability(&self) -> Option<f64> {
		self.entries.last().map(|(_, p)| *p)
	}

	/// Returns the follower selected by a draw in `[0, 1)`.
	///
	/// This is the first entry whose cumulative probability exceeds `draw`.
	/// Draws beyond the last value (float drift) select the last entry.
	pub fn select(&self, draw: f64) -> Option<&str> {
		let slot = self.entries.partition_point(|(_, p)| *p <= draw);
		self.entries
			.get(slot)
			.or_else(|| self.entries.last())
			.map(|(follower, _)| follower.as_str())
	}

	/// Draws a follower with probability proportional to its count.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		self.select(rng.random::<f64>())
	}
}

/// Serialized form of a `DistributionTable`: the lookup index is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct StoredDistribution {
	n: usize,
	contexts: Vec<(String, CumulativeList)>,
}

/// Context -> cumulative follower distribution, for one n-gram order.
///
/// Contexts iterate in the order of the frequency table they come from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(from = "StoredDistribution", into = "StoredDistribution")]
pub struct DistributionTable {
	n: usize,
	index: HashMap<String, usize>,
	contexts: Vec<(String, CumulativeList)>,
}

impl DistributionTable {
	/// Converts every context of a frequency table.
	///
	/// # Errors
	/// Returns `EmptyContext` if a context has no follower, which a table
	/// filled through `record` never holds.
	pub fn from_frequencies(table: &FrequencyTable) -> NgramResult<Self> {
		let mut contexts = Vec::with_capacity(table.len());
		for followers in table.iter() {
			contexts.push((followers.context().to_owned(), CumulativeList::from_counts(followers)?));
		}
		debug!("{}-gram distribution table: {} contexts", table.order(), contexts.len());

		Ok(StoredDistribution { n: table.order(), contexts }.into())
	}

	pub fn order(&self) -> usize {
		self.n
	}

	/// Distribution of the followers of `context`.
	pub fn get(&self, context: &str) -> Option<&CumulativeList> {
		self.index.get(context).map(|&slot| &self.contexts[slot].1)
	}

	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	/// Iterates `(context, distribution)` in table order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &CumulativeList)> {
		self.contexts.iter().map(|(context, list)| (context.as_str(), list))
	}
}

impl From<StoredDistribution> for DistributionTable {
	fn from(stored: StoredDistribution) -> Self {
		let index = stored
			.contexts
			.iter()
			.enumerate()
			.map(|(slot, (context, _))| (context.clone(), slot))
			.collect();
		Self { n: stored.n, index, contexts: stored.contexts }
	}
}

impl From<DistributionTable> for StoredDistribution {
	fn from(table: DistributionTable) -> Self {
		Self { n: table.n, contexts: table.contexts }
	}
}
