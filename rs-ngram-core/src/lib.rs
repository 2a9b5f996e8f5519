//! Word n-gram language model builder.
//!
//! This crate turns a text corpus into per-context cumulative probability
//! tables, ready for weighted random sampling:
//! - Script-aware tokenization into sentinel-delimited sentences
//! - N-gram extraction for any order
//! - Follower counting, sequential or split across threads
//! - Cumulative distribution tables, one per order
//! - Persistence of each table to its own binary artifact
//!
//! ```no_run
//! use rs_ngram_core::config::BuildConfig;
//! use rs_ngram_core::model::language_model::LanguageModel;
//! use rs_ngram_core::model::tokenizer::{Alphabet, Tokenizer};
//! use rs_ngram_core::progress::LogProgress;
//!
//! # fn main() -> Result<(), rs_ngram_core::error::NgramError> {
//! let tokenizer = Tokenizer::new(Alphabet::default())?;
//! let lines = rs_ngram_core::io::read_lines("shakespeare.txt")?;
//! let model = LanguageModel::from_text(&tokenizer, lines, &BuildConfig::default(), &LogProgress)?;
//! rs_ngram_core::io::write_model(&model, ".", &LogProgress)?;
//! # Ok(())
//! # }
//! ```

/// Tokenizer, n-gram counting and distribution tables.
pub mod model;

/// Build parameters (`BuildConfig`).
pub mod config;

/// Crate error type.
pub mod error;

/// Stage timing events and their sinks.
pub mod progress;

/// Corpus loading and table persistence.
pub mod io;
