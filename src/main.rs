//! Technical indicator snapshot CLI.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use logging::setup_logging;
use ta_config::load_config_or_default;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Setup logging
    let log_level = cli
        .log_level
        .map(|level| level.as_str())
        .unwrap_or(config.logging.level.as_str());
    setup_logging(log_level, cli.json_logs || config.logging.is_json());

    // Execute command
    match cli.command {
        Commands::Indicators(args) => cli::commands::indicators::run(args, &config).await,
        Commands::Batch(args) => cli::commands::batch::run(args, &config).await,
        Commands::List => cli::commands::list::run().await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
