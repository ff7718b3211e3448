//! Per-scan accumulated state.

use std::collections::HashMap;

use crate::classify::{classify, Classification, TargetHost};
use crate::domain::base_domain;
use crate::parse::{ImageRecord, PageContent};

/// State owned by one scan: the classified host map, the ordered image list,
/// and the target identity everything is compared against.
///
/// A session is created after the page is loaded, mutated only by the scan
/// task that owns it, and discarded once the terminal event is emitted.
/// Nothing here is shared across scans.
#[derive(Debug)]
pub struct ScanSession {
    /// Normalized target identity.
    pub target: TargetHost,
    /// Image resources in extraction order.
    pub images: Vec<ImageRecord>,
    classifications: HashMap<String, Classification>,
}

impl ScanSession {
    /// Builds a session from the extracted page content.
    ///
    /// The target hostname is always entered into the classification map
    /// first, as PRIMARY, regardless of what the classifier would say; every
    /// other extracted host is then classified against the target.
    pub fn new(target: TargetHost, content: PageContent) -> Self {
        let mut classifications = HashMap::new();
        if !target.name.is_empty() {
            classifications.insert(target.name.clone(), Classification::Primary);
        }
        for host in &content.hosts {
            if !classifications.contains_key(host) {
                let classification = classify(host, &target);
                classifications.insert(host.clone(), classification);
            }
        }
        ScanSession {
            target,
            images: content.images,
            classifications,
        }
    }

    /// Classified hosts sorted by class rank (PRIMARY, SUBDOMAIN, CDN,
    /// TRACKER, EXTERNAL), lexicographic by hostname within each class.
    ///
    /// This order is part of the event contract consumers rely on.
    pub fn sorted_domains(&self) -> Vec<(String, Classification)> {
        let mut domains: Vec<(String, Classification)> = self
            .classifications
            .iter()
            .map(|(host, &classification)| (host.clone(), classification))
            .collect();
        domains.sort_by(|a, b| (a.1.sort_rank(), &a.0).cmp(&(b.1.sort_rank(), &b.0)));
        domains
    }

    /// Number of classified hosts.
    pub fn domain_count(&self) -> usize {
        self.classifications.len()
    }

    /// Number of hosts classified SUBDOMAIN.
    pub fn subdomain_count(&self) -> usize {
        self.classifications
            .values()
            .filter(|c| **c == Classification::Subdomain)
            .count()
    }

    /// Number of hosts belonging to third parties (CDN, TRACKER, EXTERNAL).
    pub fn third_party_count(&self) -> usize {
        self.classifications
            .values()
            .filter(|c| c.is_third_party())
            .count()
    }

    /// Whether an image is served from outside the target's base domain.
    pub fn is_external_image(&self, record: &ImageRecord) -> bool {
        !record.host.is_empty() && base_domain(&record.host) != self.target.base_domain
    }
}
