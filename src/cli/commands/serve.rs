//! Serve command implementation.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use stockstudy_api::{serve, AppState};
use stockstudy_config::AppConfig;
use tracing::info;

use crate::cli::ServeArgs;

pub async fn run(args: ServeArgs, mut config: AppConfig) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let state = AppState::from_config(&config).context("Failed to initialize application state")?;
    let addr = config.server.bind_address();

    info!(
        app = %config.app.name,
        environment = %config.app.environment,
        source = state.source_name(),
        "Starting HTTP API on {}",
        addr
    );

    serve(
        Arc::new(state),
        &addr,
        Duration::from_secs(config.cache.ttl_secs),
    )
    .await
    .with_context(|| format!("Server on {} failed", addr))
}
