//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, DataSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Prefix of environment overrides, e.g. `TA_SNAPSHOT__DATA__DIR`.
pub const ENV_PREFIX: &str = "TA_SNAPSHOT";

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    build(path, true)
}

/// Like [`load_config`], but a missing file falls back to defaults.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, ConfigError> {
    build(path, false)
}

fn build(path: &Path, required: bool) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("ta-config-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.data.exchange_suffix, ".NS");
        assert_eq!(config.data.lookback_days, 365);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = write_temp("partial", "[data]\nlookback_days = 500\n");
        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.data.lookback_days, 500);
        assert_eq!(config.data.exchange_suffix, ".NS");
        assert_eq!(config.app.name, "ta-snapshot");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let path = write_temp(
            "sections",
            "[app]\nenvironment = \"production\"\n\n[logging]\nlevel = \"debug\"\n",
        );
        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.app.environment, "production");
        assert_eq!(config.app.name, "ta-snapshot");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/definitely/not/here.toml");
        assert!(load_config(path).is_err());
        let config = load_config_or_default(path).unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.logging.format = "JSON".to_string();
        let text = toml::to_string(&config).unwrap();

        let path = write_temp("roundtrip", &text);
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(loaded.logging.is_json());
        assert_eq!(loaded.data.dir, config.data.dir);
    }
}
