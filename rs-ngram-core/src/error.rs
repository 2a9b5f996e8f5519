use thiserror::Error;

/// Errors raised while building or persisting a language model.
///
/// Counting and normalizing cannot fail on a well-formed corpus, so most
/// variants belong to the I/O and configuration boundary.
#[derive(Error, Debug)]
pub enum NgramError {
	#[error("IO Error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Encoding Error: {0}")]
	Encode(#[from] postcard::Error),

	#[error("Config Parsing Error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Pattern Error: {0}")]
	Pattern(#[from] regex::Error),

	#[error("Configuration Error: {0}")]
	Config(String),

	#[error("Invalid n-gram order: {0}")]
	InvalidOrder(usize),

	#[error("Merge Error: {0}")]
	Merge(String),

	/// A context with no recorded follower reached the distribution builder.
	#[error("Context '{0}' has no followers")]
	EmptyContext(String),
}

pub type NgramResult<T> = Result<T, NgramError>;
