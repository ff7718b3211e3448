//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `page_recon` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Wiring the shared fetcher and OCR engine into the scan server
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use page_recon::initialization::{init_client, init_logger_with};
use page_recon::scan::ScanContext;
use page_recon::{start_server, Config, HttpFetcher, OcrEngine, TesseractOcr};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let ocr_engine = TesseractOcr::new(&config.tesseract_path);

    if ocr_engine.is_available().await {
        log::info!("OCR available: tesseract found at '{}'", config.tesseract_path);
    } else {
        log::warn!(
            "OCR unavailable: '{}' not runnable - scans will skip image text analysis",
            config.tesseract_path
        );
    }

    let ctx = Arc::new(ScanContext {
        fetcher: HttpFetcher::new(client),
        ocr_engine,
    });

    match start_server(&config, ctx).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("page_recon error: {:#}", e);
            process::exit(1);
        }
    }
}
