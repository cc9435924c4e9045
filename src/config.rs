//! Application configuration
//!
//! Read from a TOML file. Every section and key is optional; anything
//! missing takes its default.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! shutdown_timeout = 30
//!
//! [database]
//! url = "sqlite://./tennis.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//!
//! [booking]
//! reservation_value = 20
//! deposit = 10
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::Pricing;
use crate::infrastructure::database::DatabaseConfig;
use crate::shared::errors::ConfigError;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "TENNIS_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub booking: Pricing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

/// `$TENNIS_CONFIG`, else `<config dir>/tennis-courts/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tennis-courts")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use crate::infrastructure::database::DEFAULT_DATABASE_URL;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::parse("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.booking, Pricing::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::parse(
            r#"
            [server]
            port = 9090

            [booking]
            deposit = 12.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.address(), "0.0.0.0:9090");
        assert_eq!(cfg.booking.deposit, Decimal::new(125, 1));
        assert_eq!(cfg.booking.reservation_value, Decimal::from(20));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::parse("[server\nport = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/tennis/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
