//! Configuration structures.

use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use stockstudy_core::types::StockInfo;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub request: RequestSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl AppConfig {
    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid =
            |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Message(msg)) };

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return invalid(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            ));
        }
        if self.request.max_days == 0 {
            return invalid("request.max_days must be at least 1".to_string());
        }
        for (field, days) in [
            ("default_historical_days", self.request.default_historical_days),
            ("default_future_days", self.request.default_future_days),
        ] {
            if days == 0 || days > self.request.max_days {
                return invalid(format!(
                    "request.{} must be in 1..={}, got {}",
                    field, self.request.max_days, days
                ));
            }
        }
        if self.data.source == DataSourceKind::Csv && self.data.csv_dir.is_none() {
            return invalid("data.csv_dir is required when data.source = \"csv\"".to_string());
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "stockstudy".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Where daily bars come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    #[default]
    Mock,
    Csv,
}

/// Data source settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DataSettings {
    pub source: DataSourceKind,
    /// Directory of `<symbol>.csv` files, required for the CSV source
    pub csv_dir: Option<PathBuf>,
    /// Fixed mock seed; per-symbol seeding when unset
    pub seed: Option<u64>,
}

/// Request defaults and limits for the stock endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    pub default_historical_days: u32,
    pub default_future_days: u32,
    pub max_days: u32,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            default_historical_days: 180,
            default_future_days: 90,
            max_days: 3650,
        }
    }
}

/// Response cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 3600,
        }
    }
}

/// Stock catalog override. Empty means the built-in list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogSettings {
    pub stocks: Vec<StockInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.data.source, DataSourceKind::Mock);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_csv_requires_dir() {
        let mut config = AppConfig::default();
        config.data.source = DataSourceKind::Csv;
        assert!(config.validate().is_err());

        config.data.csv_dir = Some(PathBuf::from("./data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_request_limits() {
        let mut config = AppConfig::default();
        config.request.default_future_days = config.request.max_days + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_log_format() {
        let mut config = AppConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip_of_catalog() {
        let mut config = AppConfig::default();
        config.catalog.stocks = vec![StockInfo::new("600519", "贵州茅台").on_exchange("SS")];

        let text = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.catalog.stocks, config.catalog.stocks);
    }
}
