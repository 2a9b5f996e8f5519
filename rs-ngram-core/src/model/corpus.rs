use serde::{Deserialize, Serialize};

/// Marker opening every non-empty sentence.
pub const SENTENCE_START: &str = "<s>";

/// Marker closing every non-empty sentence.
pub const SENTENCE_END: &str = "</s>";

/// Splits text into lines ending at `\n`, `\r\n` or a bare `\r`.
///
/// Terminators are not part of the lines, and a terminator at the very end
/// of the text does not open an extra empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
	let mut rest = text;
	std::iter::from_fn(move || {
		if rest.is_empty() {
			return None;
		}
		let Some(end) = rest.find(['\r', '\n']) else {
			return Some(std::mem::take(&mut rest));
		};
		let line = &rest[..end];
		let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
		rest = &rest[end + terminator..];
		Some(line)
	})
}

/// Tokens of one input line.
///
/// Either empty, or `<s>`, at least one word, `</s>`.
pub type Sentence = Vec<String>;

/// Tokenized text, one `Sentence` per input line.
///
/// # Invariants
/// - Line order is preserved, blank lines included (as empty sentences)
/// - Every non-empty sentence starts with `SENTENCE_START` and ends with `SENTENCE_END`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Corpus {
	sentences: Vec<Sentence>,
}

impl Corpus {
	/// Creates an empty corpus.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends the sentence produced by the next input line.
	pub fn push(&mut self, sentence: Sentence) {
		debug_assert!(
			sentence.is_empty()
				|| (sentence.first().map(String::as_str) == Some(SENTENCE_START)
					&& sentence.last().map(String::as_str) == Some(SENTENCE_END))
		);
		self.sentences.push(sentence);
	}

	pub fn sentences(&self) -> &[Sentence] {
		&self.sentences
	}

	/// Number of input lines, blank ones included.
	pub fn len(&self) -> usize {
		self.sentences.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sentences.is_empty()
	}

	/// Number of sentences holding at least one word.
	pub fn non_empty_sentences(&self) -> usize {
		self.sentences.iter().filter(|s| !s.is_empty()).count()
	}

	/// Number of word tokens, sentinels excluded.
	pub fn token_count(&self) -> usize {
		self.sentences
			.iter()
			.map(|s| s.len().saturating_sub(2))
			.sum()
	}
}

impl From<Vec<Sentence>> for Corpus {
	fn from(sentences: Vec<Sentence>) -> Self {
		Self { sentences }
	}
}
