use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::info;

use rs_ngram_core::config::BuildConfig;
use rs_ngram_core::io::{read_lines, write_model};
use rs_ngram_core::model::language_model::LanguageModel;
use rs_ngram_core::model::tokenizer::{Alphabet, Tokenizer};
use rs_ngram_core::progress::LogProgress;

/// Builds word n-gram probability tables from a text corpus.
///
/// One `{n}grams.bin` table is written per order.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Corpus file, one sentence or script line per line.
	#[arg(short, long, default_value = "shakespeare.txt")]
	input: PathBuf,

	/// Directory receiving the tables.
	#[arg(short, long, default_value = ".")]
	output_dir: PathBuf,

	/// JSON build config; the flags below override it.
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Comma-separated orders to build (e.g. `1,2,3,4`).
	#[arg(long, value_delimiter = ',')]
	orders: Option<Vec<usize>>,

	/// Builds every order on its own thread.
	#[arg(long, default_value_t = false)]
	parallel_orders: bool,

	/// Splits the counting of each order across CPUs.
	#[arg(long, default_value_t = false)]
	parallel_counting: bool,

	/// Counting chunks per CPU.
	#[arg(long)]
	chunk_factor: Option<usize>,
}

impl Cli {
	/// Loads the config file, if any, then applies the flags on top.
	fn build_config(&self) -> Result<BuildConfig, Box<dyn std::error::Error>> {
		let mut config = match &self.config {
			Some(path) => BuildConfig::from_file(path)?,
			None => BuildConfig::default(),
		};

		if let Some(orders) = &self.orders {
			config.orders = orders.clone();
		}
		config.parallel_orders |= self.parallel_orders;
		config.parallel_counting |= self.parallel_counting;
		if let Some(factor) = self.chunk_factor {
			config.chunk_factor = factor;
		}

		config.validate()?;
		Ok(config)
	}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let cli = Cli::parse();
	let config = cli.build_config()?;

	info!("Begin: {} -> {}", cli.input.display(), cli.output_dir.display());
	let start = Instant::now();

	let tokenizer = Tokenizer::new(Alphabet::default())?;
	let lines = read_lines(&cli.input)?;
	info!("{} lines read, building orders {:?}", lines.len(), config.orders);

	let model = LanguageModel::from_text(&tokenizer, lines, &config, &LogProgress)?;
	for table in model.tables() {
		info!("{}-gram table: {} contexts", table.order(), table.len());
	}

	let written = write_model(&model, &cli.output_dir, &LogProgress)?;
	info!(
		"Finished processing {} tables in {:.3}s",
		written.len(),
		start.elapsed().as_secs_f64()
	);

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flags_override_defaults() {
		let cli = Cli::parse_from(["rs-ngram", "--orders", "1,3", "--parallel-counting", "--chunk-factor", "2"]);
		let config = cli.build_config().unwrap();
		assert_eq!(config.orders, vec![1, 3]);
		assert!(config.parallel_counting);
		assert!(!config.parallel_orders);
		assert_eq!(config.chunk_factor, 2);
	}

	#[test]
	fn invalid_order_is_rejected() {
		let cli = Cli::parse_from(["rs-ngram", "--orders", "0"]);
		assert!(cli.build_config().is_err());
	}

	#[test]
	fn defaults_match_the_classic_run() {
		let cli = Cli::parse_from(["rs-ngram"]);
		assert_eq!(cli.input, PathBuf::from("shakespeare.txt"));
		assert_eq!(cli.output_dir, PathBuf::from("."));
		assert_eq!(cli.build_config().unwrap(), BuildConfig::default());
	}
}
