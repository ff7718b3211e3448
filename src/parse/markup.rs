//! Host and image extraction from page markup.
//!
//! Walks an HTML document in document order and accumulates every referenced
//! network host plus an ordered, deduplicated list of image resources. Parsing
//! is tolerant: malformed markup never fails, and unresolvable URLs are
//! silently skipped.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::normalize_hostname;

/// Attributes that may carry a resource URL on any element.
const RESOURCE_ATTRIBUTES: &[&str] = &["src", "href", "action", "data-src", "content"];

/// Lazy-load fallbacks consulted, in order, when an `<img>` has no `src`.
const LAZY_SRC_ATTRIBUTES: &[&str] = &["src", "data-src", "data-lazy-src", "data-original"];

static ANY_ELEMENT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("*").unwrap_or_else(|e| {
        panic!("Failed to parse universal selector: {e}. This is a programming error.")
    })
});

/// How an image URL was discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    /// Taken from a primary or lazy-load source attribute.
    #[default]
    #[serde(rename = "")]
    Attribute,
    /// Taken from a responsive-source candidate list.
    #[serde(rename = "srcset")]
    Srcset,
}

/// One image resource referenced by the page.
///
/// Identity is the resolved URL: the extractor never emits two records with
/// the same URL, and the first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Absolute image URL after resolution against the page base.
    pub url: String,
    /// Alt text, possibly empty.
    pub alt: String,
    /// Normalized hostname of the image URL, empty when the URL has no host.
    pub host: String,
    /// How the URL was discovered.
    pub provenance: Provenance,
}

/// Accumulated page content: referenced hosts and image resources.
///
/// The accumulator is created empty, threaded through the element walk by
/// ownership, and returned to the caller; it holds no parser state of its own.
#[derive(Debug, Default)]
pub struct PageContent {
    /// Every distinct normalized hostname referenced by the page.
    pub hosts: HashSet<String>,
    /// Image resources in extraction order, deduplicated by resolved URL.
    pub images: Vec<ImageRecord>,
    seen_urls: HashSet<String>,
}

impl PageContent {
    /// Records the hostname of a resolved URL. `data:` payloads carry no host
    /// and are ignored.
    fn add_host(&mut self, url: &Url) {
        if url.scheme() == "data" {
            return;
        }
        if let Some(host) = url.host_str() {
            let host = normalize_hostname(host);
            if !host.is_empty() {
                self.hosts.insert(host);
            }
        }
    }

    /// Records an image resource unless its URL was already seen.
    fn add_image(&mut self, base: &Url, raw_src: &str, alt: &str, provenance: Provenance) {
        if raw_src.starts_with("data:") {
            return;
        }
        let Some(url) = resolve(base, raw_src) else {
            return;
        };
        if url.scheme() == "data" {
            return;
        }
        let url_str = url.to_string();
        if !self.seen_urls.insert(url_str.clone()) {
            return;
        }
        let host = url
            .host_str()
            .map(normalize_hostname)
            .unwrap_or_default();
        self.images.push(ImageRecord {
            url: url_str,
            alt: alt.to_string(),
            host,
            provenance,
        });
        self.add_host(&url);
    }
}

/// Resolves an attribute value against the page base URL.
///
/// `javascript:` pseudo-URLs and unresolvable values yield `None`; `data:`
/// payloads resolve to themselves and are filtered by the callers.
fn resolve(base: &Url, value: &str) -> Option<Url> {
    let value = value.trim();
    if value.is_empty() || value.starts_with("javascript:") {
        return None;
    }
    base.join(value).ok()
}

/// Splits a `srcset`-style candidate list into its URL tokens.
///
/// Each comma-separated candidate is `<url> [descriptor]`; descriptors are
/// dropped.
fn srcset_candidates(srcset: &str) -> impl Iterator<Item = &str> {
    srcset
        .split(',')
        .filter_map(|candidate| candidate.split_whitespace().next())
}

fn visit_element(mut content: PageContent, element: ElementRef<'_>, base: &Url) -> PageContent {
    let value = element.value();

    for attr in RESOURCE_ATTRIBUTES {
        if let Some(raw) = value.attr(attr) {
            if let Some(url) = resolve(base, raw) {
                content.add_host(&url);
            }
        }
    }

    match value.name() {
        "img" => {
            let alt = value.attr("alt").unwrap_or_default();
            let src = LAZY_SRC_ATTRIBUTES
                .iter()
                .find_map(|attr| value.attr(attr).filter(|v| !v.trim().is_empty()));
            if let Some(src) = src {
                content.add_image(base, src, alt, Provenance::Attribute);
            }
            if let Some(srcset) = value.attr("srcset") {
                for candidate in srcset_candidates(srcset) {
                    content.add_image(base, candidate, alt, Provenance::Srcset);
                }
            }
        }
        "source" => {
            if let Some(srcset) = value.attr("srcset") {
                for candidate in srcset_candidates(srcset) {
                    content.add_image(base, candidate, "", Provenance::Srcset);
                }
            }
        }
        _ => {}
    }

    content
}

/// Extracts referenced hosts and image resources from page markup.
///
/// Elements are visited in document order. The parser is tolerant of broken
/// markup and never fails; at worst the result is empty.
///
/// # Arguments
///
/// * `html` - The raw page markup
/// * `base_url` - Base for resolving relative references
///
/// # Returns
///
/// The accumulated [`PageContent`].
pub fn extract_page_content(html: &str, base_url: &Url) -> PageContent {
    let document = Html::parse_document(html);
    let mut content = PageContent::default();
    for element in document.select(&ANY_ELEMENT) {
        content = visit_element(content, element, base_url);
    }
    log::debug!(
        "Extracted {} host(s) and {} image(s) from markup",
        content.hosts.len(),
        content.images.len()
    );
    content
}
