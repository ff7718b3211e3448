//! Hostname normalization and base-domain computation.
//!
//! This module provides functions to normalize hostnames and compute the
//! registrable ("base") domain of a hostname against a fixed table of
//! multi-label public suffixes.
//!
//! Key functions:
//! - `normalize_hostname()` - Lowercases and strips trailing dots and ports
//! - `base_domain()` - Computes the registrable domain (e.g., "b.co.uk" from "a.b.co.uk")

use std::collections::HashSet;
use std::sync::LazyLock;

/// Multi-label public suffixes that require three labels for a registrable domain.
///
/// This is a fixed approximation of the Public Suffix List covering the common
/// country-code second-level registrations. It is intentionally a static table
/// rather than a live PSL download; to support an additional suffix, add it here.
static MULTI_LABEL_SUFFIXES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "com.tr", "org.tr", "net.tr", "gov.tr", "edu.tr", "mil.tr", "k12.tr", "av.tr", "dr.tr",
        "tel.tr", "info.tr", "name.tr", "co.uk", "org.uk", "me.uk", "ltd.uk", "plc.uk", "net.uk",
        "sch.uk", "gov.uk", "nhs.uk", "ac.uk", "police.uk", "com.au", "net.au", "org.au",
        "edu.au", "gov.au", "asn.au", "id.au", "co.nz", "org.nz", "net.nz", "govt.nz", "ac.nz",
        "co.jp", "ne.jp", "or.jp", "ac.jp", "go.jp", "ed.jp", "com.br", "net.br", "org.br",
        "gov.br", "edu.br", "co.in", "net.in", "org.in", "gen.in", "ac.in", "edu.in", "gov.in",
        "com.cn", "net.cn", "org.cn", "gov.cn", "edu.cn", "co.za", "org.za", "net.za", "gov.za",
        "ac.za", "com.sg", "net.sg", "org.sg", "gov.sg", "edu.sg", "com.hk", "net.hk", "org.hk",
        "gov.hk", "edu.hk", "co.kr", "ne.kr", "or.kr", "ac.kr", "go.kr", "com.my", "net.my",
        "org.my", "gov.my", "co.id", "net.id", "or.id", "ac.id", "go.id", "on.ca", "bc.ca",
        "qc.ca", "ab.ca", "mb.ca", "sk.ca", "ns.ca", "nb.ca", "com.mx", "gob.mx", "edu.mx",
        "com.ar", "gob.ar", "net.ar", "org.ar", "com.co", "gov.co", "org.co", "com.pl",
        "org.pl", "net.pl", "com.es", "gob.es", "com.pt", "edu.pt", "gov.pt", "com.ua",
        "gov.ua", "org.ua", "co.il", "gov.il", "ac.il", "com.ph", "net.ph", "org.ph", "gov.ph",
        "com.pk", "net.pk", "org.pk", "gov.pk", "com.eg", "gov.eg", "com.ng", "gov.ng",
        "com.sa", "gov.sa", "org.sa",
    ])
});

/// Normalizes a hostname for comparison and storage.
///
/// Lowercases the name, strips any trailing dot (DNS root label), and strips
/// a trailing `:port` suffix. Bracketed IPv6 literals lose their brackets but
/// are otherwise left intact.
///
/// All hostname comparisons in this crate go through this function so that a
/// host differing from another only by case, trailing dot, or port compares
/// equal.
///
/// # Arguments
///
/// * `host` - The raw hostname, possibly with port or trailing dot
///
/// # Returns
///
/// The normalized hostname. May be empty if the input carried no name at all.
pub fn normalize_hostname(host: &str) -> String {
    let host = host.trim().to_ascii_lowercase();

    // Bracketed IPv6 literal: strip the brackets, keep the address whole.
    if let Some(stripped) = host.strip_prefix('[') {
        return stripped
            .split(']')
            .next()
            .unwrap_or_default()
            .to_string();
    }

    let host = host.split(':').next().unwrap_or_default();
    host.trim_end_matches('.').to_string()
}

/// Computes the registrable ("base") domain of a hostname.
///
/// The input is normalized first. Names with a single label (e.g. "localhost")
/// are returned unchanged. For names with three or more labels, the last two
/// labels are checked against the multi-label suffix table: on a match the
/// base domain is the last three labels, otherwise the last two.
///
/// # Arguments
///
/// * `hostname` - The hostname to reduce
///
/// # Returns
///
/// The base domain, used for same-site comparison. Empty input yields an
/// empty string.
pub fn base_domain(hostname: &str) -> String {
    let host = normalize_hostname(hostname);
    if host.is_empty() {
        return host;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 1 {
        return host;
    }
    if labels.len() >= 3 {
        let last_two = labels[labels.len() - 2..].join(".");
        if MULTI_LABEL_SUFFIXES.contains(last_two.as_str()) {
            return labels[labels.len() - 3..].join(".");
        }
    }
    labels[labels.len() - 2..].join(".")
}
