use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use log::debug;

use super::corpus::Corpus;
use super::ngrams::ngrams;
use crate::error::{NgramError, NgramResult};

/// Observed followers of a single context n-gram.
///
/// Conceptually a node of a Markov chain whose outgoing edges are weighted
/// by how often they were seen.
///
/// # Invariants
/// - Every count is >= 1
/// - Followers iterate in the order they were first recorded
#[derive(Clone, Debug, PartialEq)]
pub struct FollowerCounts {
	/// The context n-gram these followers belong to.
	context: String,
	/// Follower key -> slot in `followers`.
	index: HashMap<String, usize>,
	followers: Vec<(String, u64)>,
}

impl FollowerCounts {
	/// Creates an empty follower set for `context`.
	pub fn new(context: &str) -> Self {
		Self {
			context: context.to_owned(),
			index: HashMap::new(),
			followers: Vec::new(),
		}
	}

	pub fn context(&self) -> &str {
		&self.context
	}

	/// Records one more occurrence of `follower`.
	pub fn add(&mut self, follower: &str) {
		self.add_count(follower, 1);
	}

	/// Records `count` occurrences of `follower` at once.
	///
	/// A zero count is ignored so that no follower is ever stored with
	/// count 0.
	pub fn add_count(&mut self, follower: &str, count: u64) {
		if count == 0 {
			return;
		}
		match self.index.get(follower).copied() {
			Some(slot) => self.followers[slot].1 += count,
			None => {
				self.index.insert(follower.to_owned(), self.followers.len());
				self.followers.push((follower.to_owned(), count));
			}
		}
	}

	/// Occurrences of `follower` after this context, 0 if never seen.
	pub fn count(&self, follower: &str) -> u64 {
		self.index.get(follower).map_or(0, |&slot| self.followers[slot].1)
	}

	/// Sum of all follower counts.
	pub fn total(&self) -> u64 {
		self.followers.iter().map(|(_, count)| count).sum()
	}

	pub fn len(&self) -> usize {
		self.followers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.followers.is_empty()
	}

	/// Iterates `(follower, count)` in first-recorded order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
		self.followers.iter().map(|(follower, count)| (follower.as_str(), *count))
	}

	/// Adds the counts of `other` into this set.
	///
	/// Followers unknown to `self` are appended in `other`'s order.
	///
	/// # Errors
	/// Returns an error if the two sets belong to different contexts.
	pub fn merge(&mut self, other: &Self) -> NgramResult<()> {
		if self.context != other.context {
			return Err(NgramError::Merge(format!(
				"Context mismatch: '{}' vs '{}'",
				self.context, other.context
			)));
		}

		for (follower, count) in other.iter() {
			self.add_count(follower, count);
		}

		Ok(())
	}
}

/// Two-level count table of one n-gram order: context -> follower -> count.
///
/// The follower of the n-gram at position `i` of the corpus-wide n-gram list
/// is the one at position `i + n`, the next non-overlapping n-gram. The list
/// is flat, so near the end of a sentence the follower can come from the
/// next non-empty sentence.
///
/// # Invariants
/// - Every stored context has at least one follower
/// - Contexts iterate in the order they were first recorded
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyTable {
	/// Order of the n-grams (number of tokens per key).
	n: usize,
	/// Context key -> slot in `contexts`.
	index: HashMap<String, usize>,
	contexts: Vec<FollowerCounts>,
}

impl FrequencyTable {
	/// Creates an empty table for order `n`.
	pub fn new(n: usize) -> Self {
		Self { n, index: HashMap::new(), contexts: Vec::new() }
	}

	/// Counts the corpus n-grams of order `n`.
	pub fn from_corpus(corpus: &Corpus, n: usize) -> Self {
		Self::from_ngrams(&ngrams(corpus, n), n)
	}

	/// Counts `flat[i] -> flat[i + n]` for every valid `i`, sequentially.
	pub fn from_ngrams(flat: &[String], n: usize) -> Self {
		let mut table = Self::new(n);
		table.count_range(flat, 0, Self::pair_count(flat, n));
		debug!("{}-gram frequency table: {} contexts", n, table.len());
		table
	}

	/// Same counts as `from_ngrams`, computed on `chunks` worker threads.
	///
	/// The pair range is split into contiguous chunks, each counted into
	/// its own partial table. Partials are merged back in chunk order, which
	/// keeps the first-recorded order of the sequential build.
	///
	/// # Errors
	/// Returns an error if two partial tables cannot be merged.
	pub fn from_ngrams_parallel(flat: &[String], n: usize, chunks: usize) -> NgramResult<Self> {
		let pairs = Self::pair_count(flat, n);
		let chunks = chunks.clamp(1, pairs.max(1));
		if chunks == 1 {
			return Ok(Self::from_ngrams(flat, n));
		}
		let chunk_size = pairs.div_ceil(chunks);

		let mut partials: Vec<Option<FrequencyTable>> = vec![None; chunks];
		thread::scope(|scope| {
			let (tx, rx) = mpsc::channel();
			for (slot, start) in (0..pairs).step_by(chunk_size).enumerate() {
				let tx = tx.clone();
				let end = (start + chunk_size).min(pairs);
				scope.spawn(move || {
					let mut partial = FrequencyTable::new(n);
					partial.count_range(flat, start, end);
					// The receiver outlives every worker of this scope
					let _ = tx.send((slot, partial));
				});
			}
			drop(tx);

			for (slot, partial) in rx.iter() {
				partials[slot] = Some(partial);
			}
		});

		let mut table = Self::new(n);
		for partial in partials.into_iter().flatten() {
			table.merge(&partial)?;
		}
		debug!("{}-gram frequency table: {} contexts ({} chunks)", n, table.len(), chunks);
		Ok(table)
	}

	/// Number of `(context, follower)` pairs in a flat list of order `n`.
	fn pair_count(flat: &[String], n: usize) -> usize {
		flat.len().saturating_sub(n)
	}

	fn count_range(&mut self, flat: &[String], start: usize, end: usize) {
		for i in start..end {
			self.record(&flat[i], &flat[i + self.n]);
		}
	}

	pub fn order(&self) -> usize {
		self.n
	}

	/// Records one occurrence of `follower` after `context`.
	pub fn record(&mut self, context: &str, follower: &str) {
		self.followers_mut(context).add(follower);
	}

	fn followers_mut(&mut self, context: &str) -> &mut FollowerCounts {
		let slot = match self.index.get(context).copied() {
			Some(slot) => slot,
			None => {
				self.index.insert(context.to_owned(), self.contexts.len());
				self.contexts.push(FollowerCounts::new(context));
				self.contexts.len() - 1
			}
		};
		&mut self.contexts[slot]
	}

	/// Followers of `context`, if it was ever seen.
	pub fn get(&self, context: &str) -> Option<&FollowerCounts> {
		self.index.get(context).map(|&slot| &self.contexts[slot])
	}

	/// Occurrences of `follower` after `context`, 0 if never seen.
	pub fn count(&self, context: &str, follower: &str) -> u64 {
		self.get(context).map_or(0, |followers| followers.count(follower))
	}

	/// Total follower occurrences of `context`, 0 if never seen.
	pub fn total(&self, context: &str) -> u64 {
		self.get(context).map_or(0, FollowerCounts::total)
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	/// Iterates contexts in first-recorded order.
	pub fn iter(&self) -> impl Iterator<Item = &FollowerCounts> {
		self.contexts.iter()
	}

	/// Merges another table of the same order into this one.
	///
	/// Counts of shared `(context, follower)` pairs are summed; new contexts
	/// and followers are appended in `other`'s order.
	///
	/// # Errors
	/// Returns an error if the orders differ.
	pub fn merge(&mut self, other: &Self) -> NgramResult<()> {
		if self.n != other.n {
			return Err(NgramError::Merge(format!("N mismatch: {} vs {}", self.n, other.n)));
		}

		for followers in other.iter() {
			match self.index.get(followers.context()).copied() {
				Some(slot) => self.contexts[slot].merge(followers)?,
				None => {
					self.index.insert(followers.context().to_owned(), self.contexts.len());
					self.contexts.push(followers.clone());
				}
			}
		}

		Ok(())
	}
}
