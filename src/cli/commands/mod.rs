//! CLI command implementations.

pub mod batch;
pub mod indicators;
pub mod list;
pub mod validate;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use ta_config::AppConfig;
use ta_data::CsvDataSource;
use ta_engine::{EngineConfig, SnapshotEngine};

use crate::cli::DataArgs;

/// Build the CSV-backed engine, command line flags taking precedence over config.
pub(crate) fn build_engine(
    args: &DataArgs,
    config: &AppConfig,
) -> Result<SnapshotEngine<CsvDataSource>> {
    let dir = args.data.as_ref().unwrap_or(&config.data.dir);
    let suffix = args
        .suffix
        .clone()
        .unwrap_or_else(|| config.data.exchange_suffix.clone());

    let source = CsvDataSource::new(dir)
        .with_context(|| format!("Cannot use data directory '{}'", dir.display()))?
        .with_suffix(suffix);

    let engine_config = EngineConfig {
        lookback_days: args.lookback_days.unwrap_or(config.data.lookback_days),
    };
    Ok(SnapshotEngine::new(source, engine_config))
}

/// The as-of date, defaulting to today.
pub(crate) fn as_of(args: &DataArgs) -> NaiveDate {
    args.as_of.unwrap_or_else(|| Local::now().date_naive())
}
