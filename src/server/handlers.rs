//! HTTP handlers for the scan server.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::stream::Stream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::config::constants::KEEPALIVE_INTERVAL;
use crate::fetch::HttpFetcher;
use crate::ocr::TesseractOcr;
use crate::scan::{run_scan, ScanContext, ScanEvent, ScanRequest};

/// Shared state for the scan server.
#[derive(Clone)]
pub struct AppState {
    /// Collaborators handed to every spawned scan task.
    pub ctx: Arc<ScanContext<HttpFetcher, TesseractOcr>>,
}

/// Query parameters accepted by `/scan`.
#[derive(Debug, Deserialize)]
pub struct ScanParams {
    /// Absolute URL or local file path to scan.
    #[serde(default)]
    target: String,
    /// OCR toggle; anything but "0" enables OCR.
    #[serde(default)]
    ocr: Option<String>,
}

/// JSON response for the `/` endpoint.
#[derive(Serialize)]
struct ServiceInfo {
    name: &'static str,
    version: &'static str,
    scan_endpoint: &'static str,
}

/// Serves a small service descriptor so a probe of `/` gets something useful.
pub async fn index_handler() -> Json<impl Serialize> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        scan_endpoint: "/scan?target=<url-or-path>&ocr=1",
    })
}

/// Streams one scan as Server-Sent Events.
///
/// The scan runs in its own task writing into an unbounded FIFO channel;
/// this handler relays the channel in emission order, one JSON event per SSE
/// frame, with keep-alive frames whenever the scan is quiet. The stream ends
/// when the scan task drops its sender after the terminal `done` event.
///
/// A missing `target` yields a two-event stream (err log, done) without
/// spawning anything.
pub async fn scan_handler(
    State(state): State<AppState>,
    Query(params): Query<ScanParams>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::unbounded_channel();

    let target = params.target.trim().to_string();
    if target.is_empty() {
        let _ = tx.send(ScanEvent::err("No target provided."));
        let _ = tx.send(ScanEvent::Done);
        drop(tx);
    } else {
        let ocr = params.ocr.as_deref() != Some("0");
        log::info!("Starting scan of '{}' (ocr: {})", target, ocr);
        let ctx = Arc::clone(&state.ctx);
        tokio::spawn(run_scan(ScanRequest { target, ocr }, ctx, tx));
    }

    let stream = UnboundedReceiverStream::new(rx).map(|event| {
        let frame = Event::default().json_data(&event).unwrap_or_else(|e| {
            // Serialization of our own event types cannot realistically
            // fail; degrade to a comment frame rather than dropping the
            // connection.
            log::warn!("Failed to serialize scan event: {}", e);
            Event::default().comment("unserializable event")
        });
        Ok(frame)
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEPALIVE_INTERVAL).text("ping"))
}
