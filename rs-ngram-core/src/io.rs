use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::debug;

use crate::error::{NgramError, NgramResult};
use crate::model::corpus::split_lines;
use crate::model::distribution::DistributionTable;
use crate::model::language_model::LanguageModel;
use crate::progress::{Progress, ProgressEvent, Stage};

/// Extension of persisted distribution tables.
pub const TABLE_EXTENSION: &str = "bin";

/// Suffix of a table file stem, after the order (`3grams.bin`).
const TABLE_SUFFIX: &str = "grams";

/// Loads a UTF-8 corpus file as lines.
///
/// `\n`, `\r\n` and a bare `\r` all end a line.
///
/// # Errors
/// Fails if the file cannot be read or is not valid UTF-8.
pub fn read_lines<P: AsRef<Path>>(filename: P) -> NgramResult<Vec<String>> {
	let contents = fs::read_to_string(filename)?;
	Ok(split_lines(&contents).map(str::to_owned).collect())
}

/// Path of the artifact holding the table of order `n` inside `dir`.
///
/// Example: `out` + 2 → `out/2grams.bin`
pub fn table_path<P: AsRef<Path>>(dir: P, n: usize) -> PathBuf {
	dir.as_ref().join(format!("{n}{TABLE_SUFFIX}.{TABLE_EXTENSION}"))
}

/// Order encoded in a table file name (`out/3grams.bin` → 3), if any.
fn table_order(path: &Path) -> Option<usize> {
	if path.extension()? != TABLE_EXTENSION {
		return None;
	}
	path.file_stem()?
		.to_str()?
		.strip_suffix(TABLE_SUFFIX)?
		.parse()
		.ok()
}

/// Serializes one table to `path` with `postcard`.
pub fn write_table<P: AsRef<Path>>(table: &DistributionTable, path: P) -> NgramResult<()> {
	let bytes = postcard::to_stdvec(table)?;
	fs::write(&path, &bytes)?;
	debug!("{} bytes written to {}", bytes.len(), path.as_ref().display());
	Ok(())
}

/// Loads a table written by `write_table`.
pub fn read_table<P: AsRef<Path>>(path: P) -> NgramResult<DistributionTable> {
	let bytes = fs::read(path)?;
	Ok(postcard::from_bytes(&bytes)?)
}

/// Writes every table of the model to its own artifact in `dir`.
///
/// The directory is created if needed. Returns the written paths, in
/// model order.
pub fn write_model<P: AsRef<Path>>(
	model: &LanguageModel,
	dir: P,
	progress: &dyn Progress,
) -> NgramResult<Vec<PathBuf>> {
	let dir = dir.as_ref();
	fs::create_dir_all(dir)?;

	let mut written = Vec::with_capacity(model.tables().len());
	for table in model.tables() {
		let start = Instant::now();
		let path = table_path(dir, table.order());
		write_table(table, &path)?;
		progress.on_stage(ProgressEvent { stage: Stage::Persist(table.order()), elapsed: start.elapsed() });
		written.push(path);
	}
	Ok(written)
}

/// Loads every `{n}grams.bin` table of `dir`, sorted by order.
///
/// # Errors
/// Fails if the directory cannot be listed, if a table cannot be decoded,
/// or if a file's stored order disagrees with its name.
pub fn read_model<P: AsRef<Path>>(dir: P) -> NgramResult<LanguageModel> {
	let mut tables = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		let Some(n) = table_order(&path).filter(|_| path.is_file()) else {
			continue;
		};
		let table = read_table(&path)?;
		if table.order() != n {
			return Err(NgramError::InvalidOrder(table.order()));
		}
		tables.push(table);
	}

	tables.sort_by_key(DistributionTable::order);
	Ok(LanguageModel::from_tables(tables))
}
