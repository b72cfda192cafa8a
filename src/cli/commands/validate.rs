//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use stockstudy_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.exists() {
        println!("File not found, using defaults and environment overrides");
    }

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {} ({})", config.logging.level, config.logging.format);
            println!("Listen: {}", config.server.bind_address());
            println!("Data source: {:?}", config.data.source);
            println!(
                "Default window: {} days back, {} days forward (max {})",
                config.request.default_historical_days,
                config.request.default_future_days,
                config.request.max_days
            );
            println!(
                "Cache: {} (ttl {}s)",
                if config.cache.enabled { "on" } else { "off" },
                config.cache.ttl_secs
            );
            println!();
            println!("Effective configuration:");
            println!("{}", config.to_toml()?);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
