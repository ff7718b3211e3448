//! HTTP server streaming scan events.
//!
//! Provides two endpoints:
//! - `/` - JSON service descriptor
//! - `/scan` - Server-Sent Events stream of one scan's events
//!
//! Each `/scan` request spawns an independent scan task; the server only
//! relays that task's FIFO event channel to the client, adding SSE
//! keep-alive frames while the scan has nothing new to report.

mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::config::Config;
use crate::fetch::HttpFetcher;
use crate::ocr::TesseractOcr;
use crate::scan::ScanContext;

pub use handlers::AppState;

/// Creates and starts the scan server.
///
/// # Arguments
///
/// * `config` - Bind address and port
/// * `ctx` - Shared fetcher and OCR collaborators handed to every scan
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn start_server(
    config: &Config,
    ctx: Arc<ScanContext<HttpFetcher, TesseractOcr>>,
) -> Result<(), anyhow::Error> {
    let state = AppState { ctx };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port))
        .await
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to bind scan server to {}:{}: {}",
                config.host,
                config.port,
                e
            )
        })?;

    log::info!(
        "Scan server listening on http://{}:{}/",
        config.host,
        config.port
    );
    log::info!(
        "  - Scan: http://{}:{}/scan?target=<url-or-path>&ocr=1",
        config.host,
        config.port
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Scan server error: {}", e))?;

    Ok(())
}

/// Builds the router; separated from `start_server` so tests can serve it on
/// an ephemeral listener.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/scan", get(handlers::scan_handler))
        .with_state(state)
}
