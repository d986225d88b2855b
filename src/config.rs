use clap::Parser;
use std::path::PathBuf;

use crate::errors::{EstimatorError, Result};

/// Estimate the roaster temperature from daily sensor extracts and report
/// its RMSE against recorded temperatures.
#[derive(Parser, Debug, Clone)]
#[command(name = "roaster_temp", version, about, long_about = None)]
pub struct RunConfig {
    /// Path to directory with source data for simulation
    #[arg(long = "path-to-data", value_name = "DIR")]
    pub data_path: PathBuf,

    /// Path to test file with temperatures data
    #[arg(long = "path-to-test-file", value_name = "FILE")]
    pub test_file_path: PathBuf,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl RunConfig {
    /// Both paths must exist before any data is read.
    pub fn validate(&self) -> Result<()> {
        if !self.data_path.is_dir() {
            return Err(EstimatorError::InvalidPath {
                what: "data directory",
                path: self.data_path.clone(),
            });
        }
        if !self.test_file_path.exists() {
            return Err(EstimatorError::InvalidPath {
                what: "test file",
                path: self.test_file_path.clone(),
            });
        }
        Ok(())
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
