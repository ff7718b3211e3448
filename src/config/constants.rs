//! Configuration constants.
//!
//! This module defines the operational constants used throughout the
//! application: size limits, OCR bounds, and streaming parameters.

use std::time::Duration;

/// Maximum number of images submitted to OCR per scan.
/// OCR dominates scan latency; this hard cap bounds the worst case.
pub const OCR_IMAGE_LIMIT: usize = 30;

/// Maximum response body size in bytes (4MB).
/// Responses larger than this are rejected to prevent memory exhaustion.
pub const MAX_RESPONSE_BODY_SIZE: usize = 4 * 1024 * 1024;

/// Maximum width of the preview thumbnail attached to OCR findings.
pub const THUMBNAIL_MAX_WIDTH: u32 = 200;

/// JPEG quality used when encoding preview thumbnails.
pub const THUMBNAIL_JPEG_QUALITY: u8 = 75;

/// Images narrower than this are upscaled before OCR.
/// Small images OCR poorly; upscaling recovers text the engine would miss.
pub const OCR_MIN_WIDTH: u32 = 800;

/// Tesseract page segmentation modes tried per image, in order.
/// The longest recognized text across the modes wins.
pub const OCR_PSM_MODES: &[u8] = &[6, 11, 3];

/// Interval between SSE keep-alive frames while a scan has nothing to report.
/// Short enough that intermediate proxies never see an idle stream.
pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Synthetic base URL used when scanning a local HTML file, so relative
/// references still resolve deterministically. The `.invalid` TLD guarantees
/// the host can never collide with a real site.
pub const LOCAL_FILE_BASE_URL: &str = "https://local.invalid/";

/// Default timeout for page and image fetches, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Default User-Agent string for HTTP requests.
///
/// A browser-like User-Agent avoids trivial bot rejections on pages that
/// gate content by client. Users can override this via the `--user-agent`
/// CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
