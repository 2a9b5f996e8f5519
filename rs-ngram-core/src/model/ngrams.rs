use super::corpus::Corpus;

/// Separator between the tokens of an n-gram key.
pub const NGRAM_SEPARATOR: &str = " ";

/// Returns every n-gram of the corpus as a space-joined key.
///
/// Sentences are visited in order and each one is scanned left to right;
/// sentences shorter than `n` contribute nothing and no n-gram spans two
/// sentences. `n == 0` yields nothing.
pub fn ngrams(corpus: &Corpus, n: usize) -> Vec<String> {
	if n == 0 {
		return Vec::new();
	}

	corpus
		.sentences()
		.iter()
		.filter(|sentence| sentence.len() >= n)
		.flat_map(|sentence| sentence.windows(n).map(|window| window.join(NGRAM_SEPARATOR)))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::tokenizer::{Alphabet, Tokenizer};

	fn corpus(lines: &[&str]) -> Corpus {
		Tokenizer::new(Alphabet::default()).unwrap().tokenize_text(lines)
	}

	#[test]
	fn unigrams_include_sentinels() {
		assert_eq!(ngrams(&corpus(&["the cat sat"]), 1), vec![
			"<s>", "the", "cat", "sat", "</s>"
		]);
	}

	#[test]
	fn ngrams_stay_inside_sentences() {
		let c = corpus(&["a dog", "", "a cat"]);
		assert_eq!(ngrams(&c, 3), vec!["<s> a dog", "a dog </s>", "<s> a cat", "a cat </s>"]);
	}

	#[test]
	fn short_sentences_contribute_nothing() {
		let c = corpus(&["hi", "a b c"]);
		assert_eq!(ngrams(&c, 4), vec!["<s> a b c", "a b c </s>"]);
		assert!(ngrams(&c, 6).is_empty());
		assert!(ngrams(&c, 0).is_empty());
	}
}
