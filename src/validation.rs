//! Validation of the estimates against recorded temperatures.

use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::data_models::{EstimationResult, GroundTruthRow};
use crate::errors::{EstimatorError, ParseError, Result};
use crate::parsers::csv_parser;

/// Load the `;`-separated ground truth temperature file.
pub fn load_ground_truth(path: &Path) -> Result<Vec<GroundTruthRow>> {
    let file = File::open(path).map_err(|e| ParseError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rows = csv_parser::read_ground_truth(BufReader::new(file), path)?;
    log::info!("Loaded {} ground truth rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Inner join on exact timestamp equality. Returns `(true, estimated)` pairs
/// in ground truth order; a timestamp present several times on both sides
/// yields every combination.
pub fn join_on_timestamp(
    ground_truth: &[GroundTruthRow],
    estimated: &[EstimationResult],
) -> Vec<(f64, f64)> {
    let mut by_time: HashMap<NaiveDateTime, Vec<f64>> = HashMap::new();
    for result in estimated {
        by_time
            .entry(result.timestamp())
            .or_default()
            .push(result.estimated_temperature);
    }

    ground_truth
        .iter()
        .filter_map(|truth| by_time.get(&truth.timestamp).map(|est| (truth.temperature, est)))
        .flat_map(|(truth, est)| est.iter().map(move |e| (truth, *e)))
        .collect()
}

/// Root-mean-square error over the matched rows.
///
/// Rows without a counterpart on the other side are dropped. Zero matches is
/// an error, not NaN.
pub fn compare(ground_truth: &[GroundTruthRow], estimated: &[EstimationResult]) -> Result<f64> {
    let matched = join_on_timestamp(ground_truth, estimated);
    if matched.is_empty() {
        return Err(EstimatorError::DivisionByZero);
    }

    let error_sum: f64 = matched.iter().map(|(truth, est)| (truth - est).powi(2)).sum();
    log::info!(
        "Matched {} of {} ground truth rows against {} estimates",
        matched.len(),
        ground_truth.len(),
        estimated.len()
    );
    Ok((error_sum / matched.len() as f64).sqrt())
}
