use rs_ngram_core::config::BuildConfig;
use rs_ngram_core::model::distribution::DistributionTable;
use rs_ngram_core::model::frequency::FrequencyTable;
use rs_ngram_core::model::language_model::LanguageModel;
use rs_ngram_core::model::ngrams::ngrams;
use rs_ngram_core::model::tokenizer::{Alphabet, Tokenizer};
use rs_ngram_core::progress::NoProgress;
use rstest::{fixture, rstest};

const SCRIPT: &str = "\
HAMLET. To be, or not to be, that is the question:
Whether 'tis nobler in the mind to suffer

OPHELIA.
Good my lord, how does your honour for this many a day?
HAMLET. I humbly thank you; well, well, well.
";

#[fixture]
fn tokenizer() -> Tokenizer {
	Tokenizer::new(Alphabet::default()).unwrap()
}

#[rstest]
#[case("Don't!", "don't")]
#[case("HAMLET.", "")]
#[case("123", "")]
#[case("Wow,", "wow")]
#[case("'tis", "'tis")]
#[case("KING.LEAR", "")]
#[case("O,", "o")]
fn tokenize_word_cases(tokenizer: Tokenizer, #[case] raw: &str, #[case] expected: &str) {
	assert_eq!(tokenizer.tokenize_word(raw), expected);
}

#[rstest]
fn script_lines_become_sentences(tokenizer: Tokenizer) {
	let corpus = tokenizer.tokenize_reader(SCRIPT.as_bytes()).unwrap();

	assert_eq!(corpus.len(), 6);
	assert_eq!(corpus.non_empty_sentences(), 4);
	assert_eq!(corpus.sentences()[0][..4], ["<s>", "to", "be", "or"]);
	assert!(corpus.sentences()[2].is_empty());
	assert!(corpus.sentences()[3].is_empty());
	assert_eq!(corpus.sentences()[5], vec![
		"<s>", "i", "humbly", "thank", "you", "well", "well", "well", "</s>"
	]);
}

#[rstest]
fn the_cat_sat_end_to_end(tokenizer: Tokenizer) {
	let corpus = tokenizer.tokenize_text(["the cat sat"]);
	assert_eq!(corpus.sentences()[0], vec!["<s>", "the", "cat", "sat", "</s>"]);
	assert_eq!(ngrams(&corpus, 1), vec!["<s>", "the", "cat", "sat", "</s>"]);

	let frequencies = FrequencyTable::from_corpus(&corpus, 1);
	assert_eq!(frequencies.get("<s>").unwrap().iter().collect::<Vec<_>>(), vec![("the", 1)]);
	assert_eq!(frequencies.get("the").unwrap().iter().collect::<Vec<_>>(), vec![("cat", 1)]);

	let distribution = DistributionTable::from_frequencies(&frequencies).unwrap();
	assert_eq!(distribution.get("<s>").unwrap().entries(), &[("the".to_owned(), 1.0)]);
}

#[rstest]
fn repeated_context_splits_probability(tokenizer: Tokenizer) {
	let corpus = tokenizer.tokenize_text(["a dog", "a cat"]);
	let frequencies = FrequencyTable::from_corpus(&corpus, 1);
	assert_eq!(frequencies.get("a").unwrap().iter().collect::<Vec<_>>(), vec![("dog", 1), ("cat", 1)]);

	let distribution = DistributionTable::from_frequencies(&frequencies).unwrap();
	assert_eq!(distribution.get("a").unwrap().entries(), &[
		("dog".to_owned(), 0.5),
		("cat".to_owned(), 1.0)
	]);
}

#[rstest]
#[case::sequential(false, false)]
#[case::parallel_orders(true, false)]
#[case::parallel_counting(false, true)]
#[case::fully_parallel(true, true)]
fn build_strategies_agree(tokenizer: Tokenizer, #[case] parallel_orders: bool, #[case] parallel_counting: bool) {
	let lines: Vec<&str> = SCRIPT.lines().collect();
	let reference = LanguageModel::from_text(&tokenizer, &lines, &BuildConfig::default(), &NoProgress).unwrap();

	let config = BuildConfig { parallel_orders, parallel_counting, chunk_factor: 3, ..Default::default() };
	let model = LanguageModel::from_text(&tokenizer, &lines, &config, &NoProgress).unwrap();
	assert_eq!(model, reference);
}

#[rstest]
#[case(vec![])]
#[case(vec![""; 3])]
#[case(vec!["HAMLET.", "  ", "!!!"])]
fn empty_corpora_give_empty_tables(tokenizer: Tokenizer, #[case] lines: Vec<&str>) {
	let model = LanguageModel::from_text(&tokenizer, lines, &BuildConfig::default(), &NoProgress).unwrap();
	assert_eq!(model.tables().len(), 4);
	assert!(model.tables().iter().all(DistributionTable::is_empty));
}

#[rstest]
fn tables_follow_configured_order(tokenizer: Tokenizer) {
	let config = BuildConfig { orders: vec![3, 1], ..Default::default() };
	let model = LanguageModel::from_text(&tokenizer, SCRIPT.lines(), &config, &NoProgress).unwrap();
	assert_eq!(model.orders().collect::<Vec<_>>(), vec![3, 1]);
	assert!(model.table(2).is_none());
	assert_eq!(model.table(3).unwrap().order(), 3);
}
