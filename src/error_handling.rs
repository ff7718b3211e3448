//! Error type definitions.
//!
//! This module defines the error types used throughout the application.
//! Stage-local scan failures are reported to consumers as advisory log
//! events, never as transport failures; the types here cover resource
//! initialization and the per-item fetch/OCR operations.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// Error types for byte-fetching operations.
///
/// All of these are recoverable at scan level: a failed page fetch is the
/// scan's single fatal error, a failed image fetch is skipped.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure or non-success HTTP status.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body exceeded the configured size cap.
    #[error("response body too large ({size} bytes, limit {limit})")]
    BodyTooLarge {
        /// Actual body size in bytes.
        size: usize,
        /// Configured maximum in bytes.
        limit: usize,
    },

    /// Resource could not be produced (used by non-HTTP fetchers).
    #[error("resource unavailable: {0}")]
    Unavailable(String),
}

/// Error types for OCR operations.
///
/// Always recoverable: an OCR failure on one image never aborts the scan.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failure writing or reading the temporary image handed to the engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure encoding the image for the engine.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The engine ran but produced no usable result.
    #[error("OCR engine failed: {0}")]
    Engine(String),
}
