//! Page fetching protocol and its HTTP implementation.

use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::Instant;
use tracing::debug;

use crate::config::FetchConfig;
use crate::errors::{CallError, Result};

/// Result of a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body as text.
    pub text: String,
    /// Time taken to fetch in milliseconds.
    pub duration_ms: f64,
}

impl FetchResult {
    /// Whether the fetch returned exactly HTTP 200.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    /// The body, if this is a 200 response with a non-empty body.
    #[must_use]
    pub fn into_page_text(self) -> Option<String> {
        (self.is_ok() && !self.text.is_empty()).then_some(self.text)
    }
}

/// Protocol for page fetching: text of a page, or nothing.
///
/// Timeouts, connection errors, non-200 statuses and empty bodies all
/// yield `None`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a URL and returns its body text.
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// Fetches pages over HTTP with a browser user agent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher honouring the configured timeout, user agent and
    /// redirect limit.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.page_timeout()?)
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()?;
        Ok(Self { client })
    }

    /// Performs the request and reports status and timing.
    pub async fn fetch_result(&self, url: &str) -> std::result::Result<FetchResult, CallError> {
        let started = Instant::now();
        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();
        let text = response.text().await?;
        Ok(FetchResult {
            status_code,
            text,
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.fetch_result(url).await {
            Ok(result) => {
                debug!(
                    url,
                    status = result.status_code,
                    duration_ms = result.duration_ms,
                    bytes = result.text.len(),
                    "fetched page"
                );
                result.into_page_text()
            }
            Err(error) => {
                debug!(url, "fetch failed: {error}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProspectError;

    fn result(status_code: u16, text: &str) -> FetchResult {
        FetchResult {
            status_code,
            text: text.to_string(),
            duration_ms: 12.0,
        }
    }

    #[test]
    fn test_page_text_requires_200_and_body() {
        assert_eq!(result(200, "<html></html>").into_page_text().as_deref(), Some("<html></html>"));
        assert_eq!(result(200, "").into_page_text(), None);
        assert_eq!(result(404, "not found").into_page_text(), None);
        assert_eq!(result(204, "x").into_page_text(), None);
    }

    #[test]
    fn test_negative_timeout_is_config_error() {
        let err = HttpFetcher::new(&FetchConfig::new().with_page_timeout(-3.0)).unwrap_err();
        assert!(matches!(err, ProspectError::InvalidConfig(_)));
        let err = HttpFetcher::new(&FetchConfig::new().with_page_timeout(f64::NAN)).unwrap_err();
        assert!(matches!(err, ProspectError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_absent() {
        let fetcher = HttpFetcher::new(&FetchConfig::new().with_page_timeout(2.0)).unwrap();
        assert_eq!(fetcher.fetch("http://127.0.0.1:9/").await, None);
    }
}
