use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Timestamp '{value}' does not match format '{format}': {message}")]
    Format {
        value: String,
        format: String,
        message: String,
    },
    #[error("Missing column '{column}' in {source_name}")]
    MissingColumn { column: String, source_name: String },
    #[error("Missing or non-numeric value for channel '{channel}' at {timestamp}")]
    MissingValue { channel: String, timestamp: String },
    #[error("Domain error in '{term}': base {base} raised to non-integer exponent {exponent}")]
    Domain {
        term: &'static str,
        base: f64,
        exponent: f64,
    },
    #[error("No rows matched between ground truth and estimates, RMSE is undefined")]
    DivisionByZero,
    #[error("Invalid path for {what}: {path}")]
    InvalidPath { what: &'static str, path: PathBuf },
    #[error("Parsing failed: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading data file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error reading CSV headers in {path}: {source}")]
    HeaderReadError {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Error reading CSV record {row} in {path}: {source}")]
    RecordReadError {
        path: PathBuf,
        row: usize,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
