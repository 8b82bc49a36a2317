//! In-memory services that record their calls.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::analysis::EnrichmentProvider;
use crate::models::RootDomain;
use crate::search::{SearchProvider, SearchRequest};
use crate::web::Fetcher;

/// A search provider answering from a query → URLs table.
///
/// Unknown queries return nothing. Results are capped at the request
/// limit like a real provider.
#[derive(Debug, Default)]
pub struct StaticSearchProvider {
    results: HashMap<String, Vec<String>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl StaticSearchProvider {
    /// Creates a provider with no results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the results for an exact query.
    #[must_use]
    pub fn with_results(mut self, query: impl Into<String>, urls: &[&str]) -> Self {
        self.results
            .insert(query.into(), urls.iter().map(ToString::to_string).collect());
        self
    }

    /// Returns every request received, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().clone()
    }

    /// Returns the number of searches performed.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl SearchProvider for StaticSearchProvider {
    async fn search(&self, request: &SearchRequest) -> Vec<String> {
        self.requests.lock().push(request.clone());
        self.results
            .get(&request.query)
            .map(|urls| urls.iter().take(request.limit).cloned().collect())
            .unwrap_or_default()
    }
}

/// A fetcher serving pages from a URL → HTML table.
///
/// Unknown URLs behave like failed fetches.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    /// Creates a fetcher with no pages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `html` at `url`.
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Returns every URL requested, in order.
    #[must_use]
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }

    /// Returns the number of fetches performed.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requested.lock().len()
    }

    /// Whether any requested URL contains `needle`.
    #[must_use]
    pub fn was_requested(&self, needle: &str) -> bool {
        self.requested.lock().iter().any(|url| url.contains(needle))
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        self.requested.lock().push(url.to_string());
        self.pages.get(url).filter(|html| !html.is_empty()).cloned()
    }
}

/// An enrichment provider answering from a domain → emails table.
#[derive(Debug, Default)]
pub struct StaticEnrichment {
    emails: HashMap<String, Vec<String>>,
    lookups: Mutex<Vec<RootDomain>>,
}

impl StaticEnrichment {
    /// Creates a provider that knows no addresses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the addresses for a domain.
    #[must_use]
    pub fn with_emails(mut self, domain: impl Into<String>, emails: &[&str]) -> Self {
        self.emails
            .insert(domain.into(), emails.iter().map(ToString::to_string).collect());
        self
    }

    /// Returns every domain looked up, in order.
    #[must_use]
    pub fn lookups(&self) -> Vec<RootDomain> {
        self.lookups.lock().clone()
    }
}

#[async_trait]
impl EnrichmentProvider for StaticEnrichment {
    async fn lookup(&self, domain: &RootDomain) -> Vec<String> {
        self.lookups.lock().push(domain.clone());
        self.emails.get(domain.as_str()).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::root_domain;

    #[tokio::test]
    async fn test_static_search_caps_and_records() {
        let provider = StaticSearchProvider::new().with_results("q", &["a", "b", "c"]);
        let found = provider.search(&SearchRequest::new("q", 2)).await;
        assert_eq!(found, vec!["a".to_string(), "b".to_string()]);
        assert!(provider.search(&SearchRequest::new("other", 10)).await.is_empty());
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.requests()[1].query, "other");
    }

    #[tokio::test]
    async fn test_static_fetcher_unknown_is_absent() {
        let fetcher = StaticFetcher::new().with_page("https://a.com/", "<p>x</p>").with_page("https://b.com/", "");
        assert!(fetcher.fetch("https://a.com/").await.is_some());
        assert!(fetcher.fetch("https://b.com/").await.is_none());
        assert!(fetcher.fetch("https://c.com/").await.is_none());
        assert_eq!(fetcher.call_count(), 3);
        assert!(fetcher.was_requested("c.com"));
    }

    #[tokio::test]
    async fn test_static_enrichment_records_lookups() {
        let enrichment = StaticEnrichment::new().with_emails("a.com", &["x@a.com"]);
        assert_eq!(enrichment.lookup(&root_domain("a.com")).await, vec!["x@a.com".to_string()]);
        assert!(enrichment.lookup(&root_domain("b.com")).await.is_empty());
        assert_eq!(enrichment.lookups().len(), 2);
    }
}
