//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ta-snapshot")]
#[command(author, version, about = "Technical indicator snapshots for daily OHLCV history")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the indicator snapshot for one ticker
    Indicators(IndicatorsArgs),
    /// Compute snapshots for several tickers concurrently
    Batch(BatchArgs),
    /// List the indicators and the history each needs
    List,
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Data source overrides shared by the snapshot commands.
#[derive(clap::Args)]
pub struct DataArgs {
    /// Directory of per-ticker CSV files
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Exchange suffix appended to tickers ("" for none)
    #[arg(long)]
    pub suffix: Option<String>,

    /// Calendar days of history before the as-of date
    #[arg(long)]
    pub lookback_days: Option<u64>,

    /// As-of date (YYYY-MM-DD), exclusive; defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct IndicatorsArgs {
    /// Ticker symbol, without exchange suffix
    #[arg(short, long)]
    pub ticker: String,

    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(clap::Args)]
pub struct BatchArgs {
    /// Ticker symbols (comma-separated)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub tickers: Vec<String>,

    #[command(flatten)]
    pub data: DataArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_batch() {
        let cli = Cli::parse_from([
            "ta-snapshot",
            "-l",
            "debug",
            "batch",
            "--tickers",
            "INFY,TCS",
            "--as-of",
            "2024-06-03",
            "--output",
            "json",
        ]);
        assert!(matches!(cli.log_level, Some(LogLevel::Debug)));
        let Commands::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.tickers, vec!["INFY", "TCS"]);
        assert_eq!(args.data.as_of, NaiveDate::from_ymd_opt(2024, 6, 3));
        assert!(matches!(args.data.output, OutputFormat::Json));
    }
}
