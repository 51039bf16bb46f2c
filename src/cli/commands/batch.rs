//! Multi-ticker snapshot command.

use anyhow::Result;
use serde_json::{json, Value};
use ta_config::AppConfig;
use tracing::{error, info};

use super::{as_of, build_engine};
use crate::cli::{BatchArgs, OutputFormat};

pub async fn run(args: BatchArgs, config: &AppConfig) -> Result<()> {
    let engine = build_engine(&args.data, config)?;
    let as_of = as_of(&args.data);
    info!(tickers = args.tickers.len(), %as_of, "Computing batch");

    let results = engine.snapshot_many(&args.tickers, as_of).await;
    let mut failed = 0;

    match args.data.output {
        OutputFormat::Json => {
            let mut records = Vec::with_capacity(results.len());
            for (ticker, result) in &results {
                match result {
                    Ok(snapshot) => records.push(serde_json::to_value(snapshot)?),
                    Err(e) => {
                        error!(%ticker, error = %e, "Snapshot failed");
                        failed += 1;
                        records.push(json!({ "Ticker": ticker, "Error": e.to_string() }));
                    }
                }
            }
            println!("{}", serde_json::to_string_pretty(&Value::Array(records))?);
        }
        OutputFormat::Text => {
            for (ticker, result) in &results {
                match result {
                    Ok(snapshot) => println!("{}", snapshot.summary()),
                    Err(e) => {
                        error!(%ticker, error = %e, "Snapshot failed");
                        failed += 1;
                        println!("{ticker}: {e}\n");
                    }
                }
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} tickers failed", failed, results.len());
    }
    Ok(())
}
