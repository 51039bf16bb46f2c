//! Single-ticker snapshot command.

use anyhow::{Context, Result};
use ta_config::AppConfig;
use tracing::info;

use super::{as_of, build_engine};
use crate::cli::{IndicatorsArgs, OutputFormat};

pub async fn run(args: IndicatorsArgs, config: &AppConfig) -> Result<()> {
    let engine = build_engine(&args.data, config)?;
    let as_of = as_of(&args.data);
    info!(ticker = %args.ticker, %as_of, "Computing indicators");

    let snapshot = engine
        .snapshot(&args.ticker, as_of)
        .await
        .with_context(|| format!("Failed to compute indicators for '{}'", args.ticker))?;

    match args.data.output {
        OutputFormat::Json => println!("{}", snapshot.to_json()?),
        OutputFormat::Text => println!("{}", snapshot.summary()),
    }

    Ok(())
}
