//! Configuration management for the Crop Cycle Manager
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with SAFRA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Record store configuration
    pub store: StoreConfig,

    /// Report generation configuration
    pub report: ReportConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Seed the store with demonstration records at startup
    pub seed_fixtures: bool,

    /// JSON fixtures file replacing the built-in demonstration records
    #[serde(default)]
    pub fixtures_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Heading of generated technical reports
    pub title: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit one JSON object per log line instead of human-readable text
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("SAFRA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("store.seed_fixtures", true)?
            .set_default("report.title", DEFAULT_REPORT_TITLE)?
            .set_default("logging.json", false)?
            // Environment-specific file is optional
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(
                Environment::with_prefix("SAFRA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

pub const DEFAULT_REPORT_TITLE: &str = "Relatório Técnico de Safra";

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_fixtures: true,
            fixtures_path: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_uses_defaults() {
        let config = Config::load().unwrap();
        assert!(config.server.port > 0);
        assert!(!config.report.title.is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert!(config.store.seed_fixtures);
        assert!(config.store.fixtures_path.is_none());
        assert_eq!(config.report.title, "Relatório Técnico de Safra");
        assert!(!config.logging.json);
    }
}
