//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, CacheSettings, CatalogSettings, DataSettings, DataSourceKind,
    LoggingConfig, RequestSettings, ServerSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Environment variable prefix, e.g. `STOCKSTUDY__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "STOCKSTUDY";

/// Load configuration from file and environment.
///
/// A missing file is not an error; defaults and environment overrides apply.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = config.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
