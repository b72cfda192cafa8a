//! Stock study CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use stockstudy_api::setup_logging;
use stockstudy_config::load_config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Report configuration problems before anything depends on them
    if let Commands::ValidateConfig = cli.command {
        return cli::commands::validate::run(&cli.config).await;
    }

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Setup logging
    let log_level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let _log_guard = setup_logging(
        &log_level,
        cli.json_logs || config.logging.is_json(),
        config.logging.file.as_deref().map(Path::new),
    );

    // Execute command
    match cli.command {
        Commands::Serve(args) => cli::commands::serve::run(args, config).await,
        Commands::Analyze(args) => cli::commands::analyze::run(args, config).await,
        Commands::Stocks(args) => cli::commands::stocks::run(args, &config).await,
        // Handled above
        Commands::ValidateConfig => Ok(()),
    }
}
