use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::time::Instant;

use roaster_temp::channels;
use roaster_temp::config::RunConfig;
use roaster_temp::file_processor;
use roaster_temp::model::{self, ModelParams};
use roaster_temp::preparer;
use roaster_temp::validation;

fn main() -> Result<()> {
    let config = RunConfig::parse();

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .format_timestamp_secs()
        .init();

    if let Err(e) = config.validate() {
        println!("Invalid parameters, check all values ({})", e);
        RunConfig::command().print_help()?;
        std::process::exit(1);
    }

    let start_time = Instant::now();
    println!("Extracting and loading data to memory");
    let tables = file_processor::load_directory(&config.data_path)
        .with_context(|| format!("Failed to load extracts from {:?}", config.data_path))?;

    let prepared = preparer::prepare(&tables).context("Failed to prepare input data")?;
    if let Some(first) = prepared.first() {
        for (name, cell) in channels::PREPARED_COLUMNS.iter().zip(first.projection()) {
            log::debug!("first prepared row: {} = {:?}", name, cell);
        }
    }

    let estimated = model::estimate_all(&ModelParams::ROASTER, prepared)
        .context("Temperature estimation failed")?;
    log::info!(
        "Estimated {} rows in {:.2?}",
        estimated.len(),
        start_time.elapsed()
    );

    let ground_truth = validation::load_ground_truth(&config.test_file_path)
        .with_context(|| format!("Failed to load test file {:?}", config.test_file_path))?;
    let rmse = validation::compare(&ground_truth, &estimated)
        .context("Failed to compare estimates with test temperatures")?;

    println!("Root-mean-square error of estimated vs test temperatures");
    println!("{}", rmse);
    log::info!("Finished in {:.2?}", start_time.elapsed());

    Ok(())
}
