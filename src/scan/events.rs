//! Typed events streamed by a scan.
//!
//! Every scan emits a strictly ordered sequence of these events over a FIFO
//! channel: advisory `log` events may appear anywhere, all `domain` and
//! `image` events precede the `stats` event, OCR events follow it, and `done`
//! is always emitted exactly once, last.

use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::parse::Provenance;

/// Severity of an advisory log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Progress information.
    Info,
    /// A stage completed successfully.
    Ok,
    /// A recoverable problem; the scan continues.
    Warn,
    /// A fatal problem or a degraded stage.
    Err,
    /// OCR stage progress.
    Ocr,
}

/// One event in the scan stream.
///
/// Serialized with an internal `type` tag so consumers can dispatch on a
/// single field (e.g. `{"type":"domain","host":...,"classification":...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanEvent {
    /// Advisory message; may appear interleaved at any point.
    Log {
        /// Severity of the message.
        level: LogLevel,
        /// Human-readable text.
        message: String,
    },
    /// One classified host. Emitted in classification sort order.
    Domain {
        /// Normalized hostname.
        host: String,
        /// Trust relationship to the scan target.
        classification: Classification,
    },
    /// One discovered image resource. Emitted in extraction order.
    Image {
        /// Absolute image URL.
        url: String,
        /// Alt text, possibly empty.
        alt: String,
        /// Normalized image hostname, possibly empty.
        host: String,
        /// How the URL was discovered.
        provenance: Provenance,
        /// Whether the image is served from outside the target's base domain.
        is_external: bool,
    },
    /// Aggregate counts. Emitted once, after all domain and image events.
    Stats {
        /// Number of discovered images.
        images: usize,
        /// Number of classified hosts.
        domains: usize,
        /// Number of hosts classified SUBDOMAIN.
        subdomains: usize,
        /// Number of hosts that belong to third parties.
        third_party: usize,
    },
    /// OCR is about to process the given image.
    OcrProgress {
        /// Zero-based index of the image within the OCR batch.
        index: usize,
        /// Size of the OCR batch.
        total: usize,
        /// URL of the image.
        url: String,
    },
    /// A domain recognized inside an image. Not deduplicated across images.
    OcrDomain {
        /// Cleaned, lowercased hostname.
        host: String,
        /// The text exactly as recognized.
        raw: String,
        /// Trust relationship to the scan target.
        classification: Classification,
        /// JPEG preview of the source image as a base64 data URI.
        thumbnail: Option<String>,
        /// URL of the image the domain was recognized in.
        source_url: String,
    },
    /// Aggregate OCR counts. Emitted once, after all `ocr_domain` events.
    OcrStats {
        /// Number of OCR domain findings.
        ocr_domains: usize,
    },
    /// Terminal marker. Emitted exactly once, always last.
    Done,
}

impl ScanEvent {
    /// Builds an info-level log event.
    pub fn info(message: impl Into<String>) -> Self {
        ScanEvent::Log {
            level: LogLevel::Info,
            message: message.into(),
        }
    }

    /// Builds an ok-level log event.
    pub fn ok(message: impl Into<String>) -> Self {
        ScanEvent::Log {
            level: LogLevel::Ok,
            message: message.into(),
        }
    }

    /// Builds a warn-level log event.
    pub fn warn(message: impl Into<String>) -> Self {
        ScanEvent::Log {
            level: LogLevel::Warn,
            message: message.into(),
        }
    }

    /// Builds an err-level log event.
    pub fn err(message: impl Into<String>) -> Self {
        ScanEvent::Log {
            level: LogLevel::Err,
            message: message.into(),
        }
    }

    /// Builds an ocr-level log event.
    pub fn ocr(message: impl Into<String>) -> Self {
        ScanEvent::Log {
            level: LogLevel::Ocr,
            message: message.into(),
        }
    }
}
