//! HTTP API for the stock study service.
//!
//! Exposes health, catalog search and the split-indicator endpoint over axum,
//! plus the process-wide logging setup shared with the CLI.

pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use logging::setup_logging;
pub use models::{StockQuery, StockResponse, StudyRequest};
pub use routes::router;
pub use state::AppState;

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{debug, info};

/// Serve the API on `addr` until Ctrl-C.
pub async fn serve(state: Arc<AppState>, addr: &str, purge_every: Duration) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    let purger = {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(purge_every.max(Duration::from_secs(1)));
            loop {
                interval.tick().await;
                let purged = state.purge_cache();
                if purged > 0 {
                    debug!(purged, "Purged expired cache entries");
                }
            }
        })
    };

    let result = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    purger.abort();
    info!("Server stopped");
    result
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        // Without a signal handler, run until the process is killed
        Err(_) => std::future::pending::<()>().await,
    }
}
