//! Host trust classification.
//!
//! Classifies every hostname discovered on a page by its relationship to the
//! scan target: the target itself, a sibling under the same registrable
//! domain, a known CDN, a known tracker, or an unrelated external host.

mod patterns;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::domain::{base_domain, normalize_hostname};

pub use patterns::{CDN_PATTERNS, TRACKER_PATTERNS};

/// Trust relationship of a discovered host to the scan target.
///
/// Exactly one classification is assigned per distinct hostname within a scan.
/// The variants carry a fixed display order: `Primary` first, `External` last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Classification {
    /// The exact target hostname.
    Primary,
    /// A different host sharing the target's base domain.
    Subdomain,
    /// A known content-delivery network host.
    Cdn,
    /// A known analytics or advertising host.
    Tracker,
    /// Any other third-party host.
    External,
}

impl Classification {
    /// Fixed sort rank used when emitting classified hosts.
    pub const fn sort_rank(self) -> u8 {
        match self {
            Classification::Primary => 0,
            Classification::Subdomain => 1,
            Classification::Cdn => 2,
            Classification::Tracker => 3,
            Classification::External => 4,
        }
    }

    /// Whether the host belongs to a party other than the target site.
    pub const fn is_third_party(self) -> bool {
        !matches!(self, Classification::Primary | Classification::Subdomain)
    }
}

/// The scan target's identity, normalized once per scan.
///
/// Both fields go through [`normalize_hostname`], so classification never
/// depends on the case, trailing dot, or port of the raw input. Compute this
/// once and reuse it for every host in the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetHost {
    /// Normalized target hostname. May be empty if the target URL had no host.
    pub name: String,
    /// Base domain of the target hostname.
    pub base_domain: String,
}

impl TargetHost {
    /// Builds a normalized target identity from a raw hostname.
    pub fn new(hostname: &str) -> Self {
        let name = normalize_hostname(hostname);
        let base_domain = base_domain(&name);
        TargetHost { name, base_domain }
    }
}

/// Classifies a hostname against the scan target.
///
/// Evaluation order, first match wins:
/// 1. Same base domain as the target: `Primary` if the normalized host equals
///    the normalized target hostname, else `Subdomain`.
/// 2. CDN suffix pattern match.
/// 3. Tracker domain pattern match.
/// 4. `External`.
///
/// # Arguments
///
/// * `host` - The hostname to classify (normalized internally)
/// * `target` - The normalized target identity
pub fn classify(host: &str, target: &TargetHost) -> Classification {
    let host = normalize_hostname(host);

    if !target.base_domain.is_empty() && base_domain(&host) == target.base_domain {
        if host == target.name {
            return Classification::Primary;
        }
        return Classification::Subdomain;
    }
    if CDN_PATTERNS.iter().any(|p| p.is_match(&host)) {
        return Classification::Cdn;
    }
    if TRACKER_PATTERNS.iter().any(|p| p.is_match(&host)) {
        return Classification::Tracker;
    }
    Classification::External
}
