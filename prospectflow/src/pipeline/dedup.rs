//! Run-local candidate deduplication.

use std::collections::HashSet;
use tracing::trace;

use crate::domain::{root_domain, TldFilter};
use crate::models::{Candidate, RootDomain};

/// Turns raw result URLs into unique candidates for one run.
///
/// A URL is admitted when its root domain is non-empty, passes the TLD
/// filter and has not been seen earlier in the run. The first URL seen for
/// a domain wins.
#[derive(Debug, Clone)]
pub struct CandidateDeduplicator {
    filter: TldFilter,
    seen: HashSet<RootDomain>,
}

impl CandidateDeduplicator {
    /// Creates an empty deduplicator using `filter`.
    #[must_use]
    pub fn new(filter: TldFilter) -> Self {
        Self {
            filter,
            seen: HashSet::new(),
        }
    }

    /// Admits `url` as a candidate for `niche`, or rejects it.
    pub fn admit(&mut self, niche: &str, url: &str) -> Option<Candidate> {
        let root = root_domain(url);
        if root.is_empty() {
            trace!(url, "rejected: no domain");
            return None;
        }
        if !self.filter.matches(root.as_str()) {
            trace!(url, %root, "rejected: TLD not allowed");
            return None;
        }
        if !self.seen.insert(root.clone()) {
            trace!(url, %root, "rejected: already seen");
            return None;
        }
        Some(Candidate::new(niche, root, url))
    }

    /// Whether `domain` was admitted in this run.
    #[must_use]
    pub fn has_seen(&self, domain: &RootDomain) -> bool {
        self.seen.contains(domain)
    }

    /// Number of distinct domains admitted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_seen_wins_across_niches() {
        let mut dedup = CandidateDeduplicator::new(TldFilter::accept_all());
        let first = dedup.admit("camping", "https://blog.tents.lv/post-1").unwrap();
        assert_eq!(first.root_domain.as_str(), "tents.lv");
        assert_eq!(first.source_url, "https://blog.tents.lv/post-1");

        assert!(dedup.admit("camping", "https://www.tents.lv/").is_none());
        assert!(dedup.admit("hiking", "http://TENTS.lv/about").is_none());
        assert_eq!(dedup.len(), 1);
        assert!(dedup.has_seen(&root_domain("tents.lv")));
    }

    #[test]
    fn test_tld_filter_applies() {
        let mut dedup = CandidateDeduplicator::new(TldFilter::new([".co.uk"]));
        assert!(dedup.admit("n", "https://example.com/").is_none());
        assert!(dedup.admit("n", "https://shop.example.co.uk/").is_some());
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn test_rejects_empty_domain() {
        let mut dedup = CandidateDeduplicator::new(TldFilter::accept_all());
        assert!(dedup.admit("n", "").is_none());
        assert!(dedup.admit("n", "   ").is_none());
        assert!(dedup.is_empty());
    }
}
