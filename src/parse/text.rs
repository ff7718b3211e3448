//! Domain extraction from free text.
//!
//! Scans noisy text (typically OCR output) for domain-shaped substrings,
//! strips URL decoration, and filters out filename-like false positives.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Hosts shorter than this are discarded as OCR noise.
const MIN_HOST_LENGTH: usize = 4;
/// DNS caps a full hostname at 253 characters; anything longer is garbage.
const MAX_HOST_LENGTH: usize = 253;

fn compile_pattern(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

/// Domain-shaped substring: optional scheme, optional `www.`, one or more
/// labels, then a known multi-label suffix or a generic alphabetic TLD, with
/// an optional path that stops at whitespace and common delimiters.
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_pattern(
        r#"(?i)(?:https?://)?(?:www\.)?(?:[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+(?:com\.tr|org\.tr|net\.tr|gov\.tr|edu\.tr|co\.uk|org\.uk|com\.au|co\.nz|co\.jp|com\.br|co\.in|com\.cn|co\.za|co\.kr|com\.my|com\.ar|com\.co|com\.mx|com\.sg|com\.hk|[a-zA-Z]{2,})(?:/[^\s,;'"<>()\[\]{}]*)?"#,
        "DOMAIN_PATTERN",
    )
});

/// Filename extensions that make a candidate a file reference, not a domain.
static FILE_EXTENSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_pattern(
        r"(?i)\.(png|jpg|jpeg|gif|webp|svg|ico|bmp|pdf|zip|js|css|html|xml|json)$",
        "FILE_EXTENSION_PATTERN",
    )
});

static SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r"(?i)^https?://", "SCHEME_PREFIX"));

static WWW_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r"(?i)^www\.", "WWW_PREFIX"));

/// A domain found in free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDomain {
    /// The cleaned, lowercased hostname.
    pub host: String,
    /// The matched text exactly as it appeared, casing and prefixes included.
    pub raw: String,
}

/// Extracts domain-like strings from free text.
///
/// Each match is reduced to a bare hostname: scheme and leading `www.` are
/// stripped, the path and query are cut off, and trailing punctuation is
/// trimmed. Candidates that are too short, too long, or end in a known file
/// extension are rejected. Results are deduplicated by host in insertion
/// order; the first raw match per host is kept.
///
/// # Arguments
///
/// * `text` - Arbitrary free text, e.g. OCR output
///
/// # Returns
///
/// The distinct domains found, in order of first appearance.
pub fn extract_domains(text: &str) -> Vec<TextDomain> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for m in DOMAIN_PATTERN.find_iter(text) {
        let raw = m.as_str().trim();

        let stripped = SCHEME_PREFIX.replace(raw, "");
        let stripped = WWW_PREFIX.replace(&stripped, "");
        let host = stripped
            .split(['/', '?'])
            .next()
            .unwrap_or_default()
            .trim_end_matches(['.', ',', ';', ':', '!', '?', '\'', '"'])
            .to_ascii_lowercase();

        if host.len() < MIN_HOST_LENGTH || host.len() > MAX_HOST_LENGTH {
            continue;
        }
        if FILE_EXTENSION_PATTERN.is_match(&host) {
            continue;
        }
        if seen.insert(host.clone()) {
            found.push(TextDomain {
                host,
                raw: raw.to_string(),
            });
        }
    }
    found
}
