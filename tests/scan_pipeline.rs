//! Integration tests for the scan pipeline.
//!
//! These tests drive `run_scan` end-to-end against a mock HTTP server, with a
//! scripted OCR engine, and verify the event-stream contract: ordering,
//! dedup, classification, and the fatal-error path. No real network access
//! and no tesseract installation are required.

use std::collections::HashMap;
use std::sync::Arc;

use httptest::{matchers::*, responders::*, Expectation, Server};
use tokio::sync::mpsc;

use page_recon::scan::{run_scan, LogLevel, ScanContext, ScanEvent, ScanRequest};
use page_recon::{Classification, HttpFetcher, OcrEngine, OcrError};

/// OCR engine scripted per image URL is not possible (the engine only sees
/// pixels), so it returns one fixed text for every image.
struct ScriptedOcr {
    available: bool,
    text: &'static str,
}

impl OcrEngine for ScriptedOcr {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize(&self, _img: &image::DynamicImage) -> Result<String, OcrError> {
        Ok(self.text.to_string())
    }
}

fn png_bytes() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        16,
        16,
        image::Rgb([200, 200, 200]),
    ));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

async fn scan(target: &str, ocr: bool, engine: ScriptedOcr) -> Vec<ScanEvent> {
    let ctx = Arc::new(ScanContext {
        fetcher: HttpFetcher::new(Arc::new(reqwest::Client::new())),
        ocr_engine: engine,
    });
    let (tx, mut rx) = mpsc::unbounded_channel();
    run_scan(
        ScanRequest {
            target: target.to_string(),
            ocr,
        },
        ctx,
        tx,
    )
    .await;

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_full_scan_event_contract() {
    let server = Server::run();
    let page = concat!(
        r#"<html><body>"#,
        r#"<img src="/logo.png" alt="logo">"#,
        r#"<img src="/logo.png" alt="duplicate">"#,
        r#"<img src="https://cdn.cloudflare.com/lib.png" srcset="https://cdn.cloudflare.com/lib-2x.png 2x">"#,
        r#"<script src="https://www.googletagmanager.com/gtm.js"></script>"#,
        r#"<a href="https://partner.example.org/deal">deal</a>"#,
        r#"</body></html>"#,
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .respond_with(status_code(200).body(page)),
    );

    let target = server.url_str("/");
    let events = scan(
        &target,
        false,
        ScriptedOcr {
            available: false,
            text: "",
        },
    )
    .await;

    // done is last and unique.
    assert!(matches!(events.last(), Some(ScanEvent::Done)));
    assert_eq!(
        events.iter().filter(|e| matches!(e, ScanEvent::Done)).count(),
        1
    );

    // Every domain and image event precedes stats.
    let stats_pos = events
        .iter()
        .position(|e| matches!(e, ScanEvent::Stats { .. }))
        .expect("stats emitted");
    for (i, event) in events.iter().enumerate() {
        if matches!(event, ScanEvent::Domain { .. } | ScanEvent::Image { .. }) {
            assert!(i < stats_pos, "event {:?} after stats", event);
        }
    }

    // The duplicated logo URL was deduplicated; first alt text won.
    let logo_url = server.url_str("/logo.png");
    let logo_images: Vec<&ScanEvent> = events
        .iter()
        .filter(|e| matches!(e, ScanEvent::Image { url, .. } if *url == logo_url))
        .collect();
    assert_eq!(logo_images.len(), 1);
    assert!(
        matches!(logo_images[0], ScanEvent::Image { alt, .. } if alt == "logo"),
        "first occurrence wins"
    );

    // Host classifications: the mock server is an IP-address host, so the
    // page's own host classifies PRIMARY by forced insertion.
    let domains: HashMap<String, Classification> = events
        .iter()
        .filter_map(|e| match e {
            ScanEvent::Domain {
                host,
                classification,
            } => Some((host.clone(), *classification)),
            _ => None,
        })
        .collect();
    assert_eq!(domains["cdn.cloudflare.com"], Classification::Cdn);
    assert_eq!(domains["www.googletagmanager.com"], Classification::Tracker);
    assert_eq!(domains["partner.example.org"], Classification::External);

    // The srcset candidate is flagged with its provenance and externality.
    assert!(events.iter().any(|e| matches!(
        e,
        ScanEvent::Image { url, is_external: true, .. }
            if url == "https://cdn.cloudflare.com/lib-2x.png"
    )));
}

#[tokio::test]
async fn test_fatal_fetch_failure_yields_err_then_done() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/gone"))
            .respond_with(status_code(500)),
    );

    let target = server.url_str("/gone");
    let events = scan(
        &target,
        true,
        ScriptedOcr {
            available: true,
            text: "should.never.appear.com",
        },
    )
    .await;

    assert!(!events.iter().any(|e| matches!(
        e,
        ScanEvent::Domain { .. }
            | ScanEvent::Image { .. }
            | ScanEvent::Stats { .. }
            | ScanEvent::OcrDomain { .. }
    )));
    let err_pos = events
        .iter()
        .position(|e| matches!(e, ScanEvent::Log { level: LogLevel::Err, .. }))
        .expect("err log emitted");
    assert_eq!(events[err_pos + 1], ScanEvent::Done);
    assert!(matches!(events.last(), Some(ScanEvent::Done)));
}

#[tokio::test]
async fn test_ocr_stage_emits_findings_from_image_text() {
    let server = Server::run();
    let page = r#"<img src="/banner.png" alt="offer">"#;
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .respond_with(status_code(200).body(page)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/banner.png"))
            .respond_with(status_code(200).body(png_bytes())),
    );

    let target = server.url_str("/");
    let events = scan(
        &target,
        true,
        ScriptedOcr {
            available: true,
            text: "Win big at CASINO-PAYOUT.com today! Also see test.org!!",
        },
    )
    .await;

    let findings: Vec<(&str, &str)> = events
        .iter()
        .filter_map(|e| match e {
            ScanEvent::OcrDomain { host, raw, .. } => Some((host.as_str(), raw.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(
        findings,
        vec![
            ("casino-payout.com", "CASINO-PAYOUT.com"),
            ("test.org", "test.org"),
        ]
    );

    // Progress precedes findings; ocr_stats follows them; done is last.
    let progress_pos = events
        .iter()
        .position(|e| matches!(e, ScanEvent::OcrProgress { .. }))
        .expect("progress emitted");
    let first_finding_pos = events
        .iter()
        .position(|e| matches!(e, ScanEvent::OcrDomain { .. }))
        .expect("finding emitted");
    let ocr_stats_pos = events
        .iter()
        .position(|e| matches!(e, ScanEvent::OcrStats { ocr_domains: 2 }))
        .expect("ocr stats emitted");
    assert!(progress_pos < first_finding_pos);
    assert!(first_finding_pos < ocr_stats_pos);
    assert!(matches!(events.last(), Some(ScanEvent::Done)));

    // Findings carry a thumbnail of the source image.
    assert!(events.iter().any(|e| matches!(
        e,
        ScanEvent::OcrDomain { thumbnail: Some(t), .. }
            if t.starts_with("data:image/jpeg;base64,")
    )));
}

#[tokio::test]
async fn test_unfetchable_image_skipped_without_aborting() {
    let server = Server::run();
    let page = r#"<img src="/nope.png"><img src="/ok.png">"#;
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .respond_with(status_code(200).body(page)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/nope.png"))
            .respond_with(status_code(404)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/ok.png"))
            .respond_with(status_code(200).body(png_bytes())),
    );

    let target = server.url_str("/");
    let events = scan(
        &target,
        true,
        ScriptedOcr {
            available: true,
            text: "recovered.net",
        },
    )
    .await;

    // Both images were attempted, one warned, the other still produced a
    // finding, and the scan completed.
    let progress_count = events
        .iter()
        .filter(|e| matches!(e, ScanEvent::OcrProgress { .. }))
        .count();
    assert_eq!(progress_count, 2);
    assert!(events
        .iter()
        .any(|e| matches!(e, ScanEvent::Log { level: LogLevel::Warn, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, ScanEvent::OcrDomain { host, .. } if host == "recovered.net")));
    assert!(matches!(events.last(), Some(ScanEvent::Done)));
}
