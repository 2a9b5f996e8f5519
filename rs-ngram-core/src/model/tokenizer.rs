use std::collections::BTreeSet;
use std::io::Read;

use regex::Regex;

use super::corpus::{Corpus, SENTENCE_END, SENTENCE_START, Sentence, split_lines};
use crate::error::NgramResult;

/// A speaker or stage-direction label opening a script line (`HAMLET.`).
///
/// Anchored at the start only: `I.e.` is a label too.
const LABEL_PATTERN: &str = r"^[A-Z]+\.";

/// Set of characters a token may contain.
///
/// The default alphabet is the lowercase latin letters plus the apostrophe,
/// so that contractions like `don't` survive tokenization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
	chars: BTreeSet<char>,
}

impl Alphabet {
	pub fn new<I: IntoIterator<Item = char>>(chars: I) -> Self {
		Self { chars: chars.into_iter().collect() }
	}

	pub fn contains(&self, c: char) -> bool {
		self.chars.contains(&c)
	}
}

impl Default for Alphabet {
	fn default() -> Self {
		Self::new(('a'..='z').chain(std::iter::once('\'')))
	}
}

/// Turns raw lines into normalized word sentences.
///
/// # Responsibilities
/// - Drop speaker labels (`HAMLET.`)
/// - Lowercase words and strip every character outside the alphabet
/// - Wrap each line holding at least one word with sentinel tokens
#[derive(Clone, Debug)]
pub struct Tokenizer {
	alphabet: Alphabet,
	label: Regex,
}

impl Tokenizer {
	/// Creates a tokenizer restricted to `alphabet`.
	///
	/// # Errors
	/// Returns an error if the label pattern fails to compile.
	pub fn new(alphabet: Alphabet) -> NgramResult<Self> {
		Ok(Self { alphabet, label: Regex::new(LABEL_PATTERN)? })
	}

	/// Normalizes a single whitespace-free word.
	///
	/// Returns an empty string when the word is a label or when nothing
	/// is left after filtering; callers skip empty tokens.
	pub fn tokenize_word(&self, raw: &str) -> String {
		if self.label.is_match(raw) {
			return String::new();
		}

		raw.to_lowercase()
			.chars()
			.filter(|c| self.alphabet.contains(*c))
			.collect()
	}

	/// Tokenizes one line (without its line terminator).
	///
	/// Lines without any word, blank or label-only, give an empty sentence.
	pub fn tokenize_line(&self, line: &str) -> Sentence {
		let words: Vec<String> = line
			.split_whitespace()
			.map(|word| self.tokenize_word(word))
			.filter(|token| !token.is_empty())
			.collect();

		if words.is_empty() {
			return Vec::new();
		}

		let mut sentence = Vec::with_capacity(words.len() + 2);
		sentence.push(SENTENCE_START.to_owned());
		sentence.extend(words);
		sentence.push(SENTENCE_END.to_owned());
		sentence
	}

	/// Tokenizes every line, keeping one sentence per line.
	pub fn tokenize_text<I, S>(&self, lines: I) -> Corpus
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut corpus = Corpus::new();
		for line in lines {
			corpus.push(self.tokenize_line(line.as_ref()));
		}
		corpus
	}

	/// Reads the whole input, then tokenizes it line by line.
	///
	/// A bare `\r` ends a line just like `\n` and `\r\n` do.
	///
	/// # Errors
	/// Any read error, invalid UTF-8 included, aborts the whole corpus; no
	/// partial result is returned.
	pub fn tokenize_reader<R: Read>(&self, mut reader: R) -> NgramResult<Corpus> {
		let mut text = String::new();
		reader.read_to_string(&mut text)?;
		Ok(self.tokenize_text(split_lines(&text)))
	}
}
