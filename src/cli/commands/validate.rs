//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use ta_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Log format: {}", config.logging.format);
            println!("Data directory: {}", config.data.dir.display());
            println!("Exchange suffix: {:?}", config.data.exchange_suffix);
            println!("Lookback: {} days", config.data.lookback_days);
            if !config.data.dir.is_dir() {
                println!();
                println!("Warning: data directory does not exist");
            }
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
