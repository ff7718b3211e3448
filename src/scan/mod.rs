//! The scan pipeline.
//!
//! `run_scan` drives a single scan from target resolution through markup
//! extraction, host classification, and the optional OCR pass, emitting a
//! strictly ordered stream of [`ScanEvent`]s into a FIFO channel. One scan
//! runs as one task; the pipeline inside a scan is strictly sequential.
//!
//! Error policy: the only fatal error is an unreachable target, reported as
//! a single err-level log followed by `done`. Every later failure is
//! per-item: it is logged and the pipeline continues.

pub mod events;
mod session;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use url::Url;

use crate::classify::{classify, TargetHost};
use crate::config::constants::{LOCAL_FILE_BASE_URL, OCR_IMAGE_LIMIT};
use crate::fetch::ByteFetcher;
use crate::ocr::image::{decode, thumbnail_data_uri};
use crate::ocr::OcrEngine;
use crate::parse::{extract_domains, extract_page_content, ImageRecord};

pub use events::{LogLevel, ScanEvent};
pub use session::ScanSession;

/// One scan request: a target (absolute http/https URL or local file path)
/// and whether to run the OCR stage.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Absolute URL or filesystem path to scan.
    pub target: String,
    /// Whether to run OCR over discovered images.
    pub ocr: bool,
}

/// Shared collaborators handed to every scan task.
///
/// Both collaborators are stateless from the pipeline's point of view, so a
/// single context is shared by all concurrent scans.
pub struct ScanContext<F, O> {
    /// Retrieves page and image bytes.
    pub fetcher: F,
    /// Recognizes text in images.
    pub ocr_engine: O,
}

/// The loaded page plus everything needed to resolve references against it.
struct LoadedPage {
    html: String,
    base_url: Url,
    /// Directory of the target file when scanning a local path; used to
    /// resolve placeholder image URLs back to files on disk.
    local_dir: Option<PathBuf>,
}

/// Runs one scan to completion, emitting events into `tx`.
///
/// Always terminates the stream with exactly one `done` event, on success
/// and on fatal failure alike. Send errors are ignored: a consumer that has
/// disconnected simply stops receiving, and the scan winds down on its own.
///
/// # Arguments
///
/// * `request` - Target and OCR flag
/// * `ctx` - Fetcher and OCR collaborators
/// * `tx` - FIFO channel the consumer reads events from
pub async fn run_scan<F, O>(request: ScanRequest, ctx: Arc<ScanContext<F, O>>, tx: UnboundedSender<ScanEvent>)
where
    F: ByteFetcher,
    O: OcrEngine,
{
    let emit = |event: ScanEvent| {
        // A closed channel means the consumer went away; keep going, the
        // remaining work is bounded and the task ends naturally.
        let _ = tx.send(event);
    };

    emit(ScanEvent::info(format!("Target: {}", request.target)));

    let Some(page) = load_page(&request.target, ctx.as_ref(), &emit).await else {
        emit(ScanEvent::Done);
        return;
    };

    let target = TargetHost::new(page.base_url.host_str().unwrap_or_default());
    emit(ScanEvent::ok(format!(
        "Hostname: {}  (base domain: {})",
        target.name, target.base_domain
    )));

    let content = extract_page_content(&page.html, &page.base_url);
    let session = ScanSession::new(target, content);
    let sorted_domains = session.sorted_domains();

    emit(ScanEvent::ok(format!(
        "Discovered {} domain(s), {} image(s).",
        sorted_domains.len(),
        session.images.len()
    )));

    let missing_alt = session.images.iter().filter(|i| i.alt.is_empty()).count();
    if missing_alt > 0 {
        emit(ScanEvent::warn(format!(
            "{missing_alt} image(s) missing alt text."
        )));
    }
    let external_images = session
        .images
        .iter()
        .filter(|i| session.is_external_image(i))
        .count();
    if external_images > 0 {
        emit(ScanEvent::warn(format!(
            "{external_images} image(s) from external domains."
        )));
    }
    let trackers = sorted_domains
        .iter()
        .filter(|(_, c)| *c == crate::classify::Classification::Tracker)
        .count();
    if trackers > 0 {
        emit(ScanEvent::warn(format!(
            "{trackers} tracker/analytics domain(s) detected."
        )));
    }

    for (host, classification) in &sorted_domains {
        emit(ScanEvent::Domain {
            host: host.clone(),
            classification: *classification,
        });
    }

    for record in &session.images {
        emit(ScanEvent::Image {
            url: record.url.clone(),
            alt: record.alt.clone(),
            host: record.host.clone(),
            provenance: record.provenance,
            is_external: session.is_external_image(record),
        });
    }

    emit(ScanEvent::Stats {
        images: session.images.len(),
        domains: session.domain_count(),
        subdomains: session.subdomain_count(),
        third_party: session.third_party_count(),
    });

    if !request.ocr {
        emit(ScanEvent::info("OCR skipped."));
        emit(ScanEvent::Done);
        return;
    }
    if !ctx.ocr_engine.is_available().await {
        emit(ScanEvent::err(
            "OCR engine unavailable (tesseract not found) - skipping image text analysis.",
        ));
        emit(ScanEvent::Done);
        return;
    }

    run_ocr_stage(&session, page.local_dir.as_deref(), ctx.as_ref(), &emit).await;
    emit(ScanEvent::Done);
}

/// Resolves the target into page bytes: URL fetch, local file read, or the
/// scan's single fatal error. Emits the fatal err log itself and returns
/// `None`; the caller only appends `done`.
async fn load_page<F, O>(
    target: &str,
    ctx: &ScanContext<F, O>,
    emit: &impl Fn(ScanEvent),
) -> Option<LoadedPage>
where
    F: ByteFetcher,
    O: OcrEngine,
{
    if target.starts_with("http://") || target.starts_with("https://") {
        let base_url = match Url::parse(target) {
            Ok(url) => url,
            Err(e) => {
                emit(ScanEvent::err(format!("Fatal: invalid target URL: {e}")));
                return None;
            }
        };
        emit(ScanEvent::info("Fetching URL ..."));
        let bytes = match ctx.fetcher.fetch_bytes(target).await {
            Ok(bytes) => bytes,
            Err(e) => {
                emit(ScanEvent::err(format!("Fatal: could not fetch URL: {e}")));
                return None;
            }
        };
        emit(ScanEvent::ok(format!(
            "Received {} KB of HTML",
            bytes.len() / 1024
        )));
        return Some(LoadedPage {
            html: String::from_utf8_lossy(&bytes).into_owned(),
            base_url,
            local_dir: None,
        });
    }

    if Path::new(target).exists() {
        emit(ScanEvent::info(format!("Reading local file: {target}")));
        let bytes = match tokio::fs::read(target).await {
            Ok(bytes) => bytes,
            Err(e) => {
                emit(ScanEvent::err(format!("Fatal: could not read file: {e}")));
                return None;
            }
        };
        emit(ScanEvent::ok(format!("Loaded {} KB", bytes.len() / 1024)));
        let base_url = Url::parse(LOCAL_FILE_BASE_URL)
            .unwrap_or_else(|e| panic!("invalid local base URL constant: {e}"));
        let local_dir = std::fs::canonicalize(target)
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf));
        return Some(LoadedPage {
            html: String::from_utf8_lossy(&bytes).into_owned(),
            base_url,
            local_dir,
        });
    }

    emit(ScanEvent::err(format!(
        "'{target}' is not a reachable URL or local file."
    )));
    None
}

/// Runs OCR over at most the first `OCR_IMAGE_LIMIT` images, emitting
/// progress, findings, and the final OCR aggregate.
async fn run_ocr_stage<F, O>(
    session: &ScanSession,
    local_dir: Option<&Path>,
    ctx: &ScanContext<F, O>,
    emit: &impl Fn(ScanEvent),
) where
    F: ByteFetcher,
    O: OcrEngine,
{
    let batch = &session.images[..session.images.len().min(OCR_IMAGE_LIMIT)];
    emit(ScanEvent::ocr(format!(
        "Starting OCR on {} image(s) ...",
        batch.len()
    )));

    let mut total_findings = 0usize;
    for (index, record) in batch.iter().enumerate() {
        let name = display_name(&record.url, index);
        emit(ScanEvent::ocr(format!(
            "[{}/{}] OCR: {}",
            index + 1,
            batch.len(),
            name
        )));
        emit(ScanEvent::OcrProgress {
            index,
            total: batch.len(),
            url: record.url.clone(),
        });

        let Some(img) = load_image(record, local_dir, ctx).await else {
            emit(ScanEvent::warn(format!("  Could not load image: {name}")));
            continue;
        };

        let thumbnail = match thumbnail_data_uri(&img) {
            Ok(uri) => Some(uri),
            Err(e) => {
                log::debug!("thumbnail encoding failed for {}: {}", record.url, e);
                None
            }
        };

        let text = match ctx.ocr_engine.recognize(&img).await {
            Ok(text) => text,
            Err(e) => {
                emit(ScanEvent::warn(format!("  OCR failed on {name}: {e}")));
                continue;
            }
        };
        if text.trim().is_empty() {
            emit(ScanEvent::info(format!("  No text detected in {name}")));
            continue;
        }

        let found = extract_domains(&text);
        if found.is_empty() {
            emit(ScanEvent::info(format!("  No domains in {name}")));
            continue;
        }
        emit(ScanEvent::ok(format!(
            "  {} domain(s) found in {name}",
            found.len()
        )));
        for domain in found {
            total_findings += 1;
            let classification = classify(&domain.host, &session.target);
            emit(ScanEvent::OcrDomain {
                host: domain.host,
                raw: domain.raw,
                classification,
                thumbnail: thumbnail.clone(),
                source_url: record.url.clone(),
            });
        }
    }

    emit(ScanEvent::ocr(format!(
        "OCR complete - {total_findings} domain(s) found in images."
    )));
    emit(ScanEvent::OcrStats {
        ocr_domains: total_findings,
    });
}

/// Loads one image, preferring the local filesystem when the scan target was
/// a local file (placeholder-base URLs cannot be fetched), falling back to
/// the fetcher. Returns `None` when every source fails; the failure is
/// per-item and the caller skips the image.
async fn load_image<F, O>(
    record: &ImageRecord,
    local_dir: Option<&Path>,
    ctx: &ScanContext<F, O>,
) -> Option<image::DynamicImage>
where
    F: ByteFetcher,
    O: OcrEngine,
{
    let relative = record
        .url
        .strip_prefix(LOCAL_FILE_BASE_URL)
        .or_else(|| record.url.strip_prefix("file://"));

    if let Some(relative) = relative {
        let mut candidates = Vec::new();
        if let Some(dir) = local_dir {
            candidates.push(dir.join(relative));
        }
        candidates.push(PathBuf::from(relative));
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(relative));
        }
        for candidate in candidates {
            if let Ok(bytes) = tokio::fs::read(&candidate).await {
                match decode(&bytes) {
                    Ok(img) => return Some(img),
                    Err(e) => log::debug!("undecodable local image {:?}: {}", candidate, e),
                }
            }
        }
    }

    match ctx.fetcher.fetch_bytes(&record.url).await {
        Ok(bytes) => match decode(&bytes) {
            Ok(img) => Some(img),
            Err(e) => {
                log::debug!("undecodable image {}: {}", record.url, e);
                None
            }
        },
        Err(e) => {
            log::debug!("image fetch failed {}: {}", record.url, e);
            None
        }
    }
}

/// Short display name for an image URL: last path segment, capped length.
fn display_name(url: &str, index: usize) -> String {
    let tail: String = url
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .chars()
        .take(50)
        .collect();
    if tail.is_empty() {
        format!("image-{index}")
    } else {
        tail
    }
}
