//! Word n-gram modeling pipeline.
//!
//! Leaf-first:
//! - Sentences and corpus (`Corpus`)
//! - Line and word normalization (`Tokenizer`)
//! - N-gram extraction (`ngrams`)
//! - Follower counting (`FrequencyTable`)
//! - Cumulative distributions (`DistributionTable`)
//! - Multi-order assembly (`LanguageModel`)

/// Sentence, corpus, and the sentinel tokens.
pub mod corpus;

/// Raw text to normalized sentences.
///
/// Drops script speaker labels, lowercases, filters to a fixed alphabet.
pub mod tokenizer;

/// Flat list of space-joined n-grams of a corpus.
pub mod ngrams;

/// Context -> follower -> count tables.
///
/// Supports sequential counting and partition-then-merge counting.
pub mod frequency;

/// Context -> cumulative follower probabilities.
pub mod distribution;

/// Tables of several orders built from one corpus.
pub mod language_model;
