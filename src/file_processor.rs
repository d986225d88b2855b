use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::data_models::RawTable;
use crate::errors::{ParseError, Result};
use crate::parsers::csv_parser;

/// Gzipped extracts directly inside `dir`, sorted by file name.
///
/// Subdirectories are not searched. A file qualifies when its name contains
/// `.gz`, which also picks up names like `day.csv.gz.1`.
pub fn discover_extracts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut extracts = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| ParseError::IoError {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().contains(".gz") {
            extracts.push(entry.into_path());
        } else {
            log::debug!("Skipping {}", entry.path().display());
        }
    }
    Ok(extracts)
}

/// Decompress and decode a single extract.
pub fn read_extract(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(|e| ParseError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    csv_parser::read_raw_table(BufReader::new(GzDecoder::new(file)), path)
}

/// Load every extract in `dir`, in file-name order.
pub fn load_directory(dir: &Path) -> Result<Vec<RawTable>> {
    let paths = discover_extracts(dir)?;
    log::info!("Found {} extracts in {}", paths.len(), dir.display());

    let progress = ProgressBar::new(paths.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut tables = Vec::with_capacity(paths.len());
    for path in &paths {
        progress.set_message(path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default());
        let table = read_extract(path).inspect_err(|_| progress.abandon())?;
        tables.push(table);
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(tables)
}
