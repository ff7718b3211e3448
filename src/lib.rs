//! page_recon library: streaming web-page reconnaissance
//!
//! This library scans a web page (or a local HTML file) and streams what it
//! finds: every referenced network host with a trust classification relative
//! to the page's own domain, every referenced image resource, and, when OCR
//! is enabled, domain-like strings recognized inside the images themselves --
//! a common way pages hide links from text-based scanners.
//!
//! Results are emitted incrementally as typed [`scan::ScanEvent`]s over a
//! FIFO channel, so consumers see partial progress while the slow OCR stage
//! is still running.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use page_recon::{Config, HttpFetcher, TesseractOcr};
//! use page_recon::initialization::init_client;
//! use page_recon::scan::{run_scan, ScanContext, ScanRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let ctx = Arc::new(ScanContext {
//!     fetcher: HttpFetcher::new(init_client(&config)?),
//!     ocr_engine: TesseractOcr::new(&config.tesseract_path),
//! });
//!
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! tokio::spawn(run_scan(
//!     ScanRequest { target: "https://example.com".into(), ocr: true },
//!     ctx,
//!     tx,
//! ));
//! while let Some(event) = rx.recv().await {
//!     println!("{}", serde_json::to_string(&event)?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. The OCR stage additionally needs a
//! `tesseract` binary on the PATH (or pointed at via configuration); without
//! one, scans still run and the OCR stage degrades to an advisory log line.

#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod domain;
mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod ocr;
pub mod parse;
pub mod scan;
pub mod server;

// Re-export public API
pub use classify::{classify, Classification, TargetHost};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{FetchError, InitializationError, OcrError};
pub use fetch::{ByteFetcher, HttpFetcher};
pub use ocr::{OcrEngine, TesseractOcr};
pub use scan::{run_scan, ScanContext, ScanEvent, ScanRequest};
pub use server::start_server;
