//! Static CDN and tracker hostname patterns.
//!
//! Each pattern is anchored to the end of the hostname and either matches a
//! whole well-known hostname or requires a preceding dot, so `notcloudflare.com`
//! cannot match a `cloudflare.com` entry as a bare substring.

use regex::Regex;
use std::sync::LazyLock;

/// Compiles a static pattern, panicking with a detailed message on failure.
/// Only used for compile-time constant patterns; a failure is a programming error.
fn compile_pattern(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

/// Content-delivery network hostname patterns.
///
/// These identify hosts that serve static assets on behalf of many unrelated
/// sites. To cover an additional CDN, add its anchored pattern here.
pub static CDN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\.cloudfront\.net$",
        r"\.akamai(hd|zed)?\.net$",
        r"\.fastly\.net$",
        r"\.cloudflare\.com$",
        r"\.jsdelivr\.net$",
        r"\.unpkg\.com$",
        r"^cdnjs\.cloudflare\.com$",
        r"\.googleapis\.com$",
        r"\.gstatic\.com$",
        r"\.amazonaws\.com$",
        r"\.azureedge\.net$",
        r"\.twimg\.com$",
        r"\.fbcdn\.net$",
        r"\.cloudinary\.com$",
        r"\.imgix\.net$",
        r"\.wp\.com$",
        r"\.staticflickr\.com$",
        r"\.bunnycdn\.com$",
    ]
    .iter()
    .map(|p| compile_pattern(p, "CDN_PATTERNS"))
    .collect()
});

/// Analytics and advertising hostname patterns.
///
/// Presence of one of these hosts indicates user tracking rather than content
/// delivery. Matching is anchored like the CDN list: an entry without a leading
/// `\.` matches the bare domain and any subdomain of it.
pub static TRACKER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(^|\.)google-analytics\.com$",
        r"(^|\.)googletagmanager\.com$",
        r"(^|\.)doubleclick\.net$",
        r"(^|\.)googlesyndication\.com$",
        r"(^|\.)segment\.com$",
        r"(^|\.)mixpanel\.com$",
        r"(^|\.)hotjar\.com$",
        r"(^|\.)clarity\.ms$",
        r"(^|\.)facebook\.com$",
        r"(^|\.)connect\.facebook\.net$",
    ]
    .iter()
    .map(|p| compile_pattern(p, "TRACKER_PATTERNS"))
    .collect()
});
