//! SerpAPI-backed search provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::planner::SearchRequest;
use super::provider::SearchProvider;
use crate::config::ProspectConfig;
use crate::errors::{CallError, Result};

/// Default SerpAPI search endpoint.
pub const SERPAPI_ENDPOINT: &str = "https://serpapi.com/search.json";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    organic_results: Option<Vec<OrganicResult>>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    link: Option<String>,
}

/// Extracts organic result links from a SerpAPI response body.
///
/// Keeps provider order and truncates to `limit`. A non-empty `error`
/// field is a provider-reported error.
pub fn parse_organic_results(
    body: &str,
    limit: usize,
) -> std::result::Result<Vec<String>, CallError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| CallError::Malformed(e.to_string()))?;

    if let Some(error) = response.error.filter(|e| !e.is_empty()) {
        return Err(CallError::Provider(error));
    }

    Ok(response
        .organic_results
        .unwrap_or_default()
        .into_iter()
        .filter_map(|result| result.link.filter(|link| !link.is_empty()))
        .take(limit)
        .collect())
}

/// Interprets a SerpAPI answer: any non-2xx status is an error, otherwise
/// the body is parsed with [`parse_organic_results`].
pub fn interpret_response(
    status: u16,
    body: &str,
    limit: usize,
) -> std::result::Result<Vec<String>, CallError> {
    if !(200..300).contains(&status) {
        return Err(CallError::Status(status));
    }
    parse_organic_results(body, limit)
}

/// Google results through SerpAPI.
#[derive(Debug, Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    diagnostics: bool,
}

impl SerpApiClient {
    /// Creates a client from the process configuration.
    ///
    /// Fails with the missing-credential error when no search key is set.
    pub fn new(config: &ProspectConfig) -> Result<Self> {
        let api_key = config.credentials.require_serpapi_key()?.to_string();
        let client = Client::builder()
            .timeout(config.fetch.search_timeout()?)
            .user_agent(config.fetch.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            api_key,
            endpoint: SERPAPI_ENDPOINT.to_string(),
            diagnostics: config.run.diagnostics,
        })
    }

    /// Points the client at another endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn request(
        &self,
        request: &SearchRequest,
    ) -> std::result::Result<Vec<String>, CallError> {
        let mut params: Vec<(&str, String)> = vec![
            ("engine", "google".to_string()),
            ("q", request.query.clone()),
            ("num", request.limit.to_string()),
            ("api_key", self.api_key.clone()),
            ("google_domain", request.locale.host.to_string()),
        ];
        if let Some(geo) = request.locale.geo {
            params.push(("gl", geo.to_string()));
        }
        if let Some(language) = request.locale.language {
            params.push(("hl", language.to_string()));
        }

        let response = self.client.get(&self.endpoint).query(&params).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        interpret_response(status, &body, request.limit)
    }

    fn settle(
        &self,
        request: &SearchRequest,
        outcome: std::result::Result<Vec<String>, CallError>,
    ) -> Vec<String> {
        match outcome {
            Ok(urls) => {
                debug!(
                    query = %request.query,
                    host = request.locale.host,
                    found = urls.len(),
                    "search complete"
                );
                urls
            }
            Err(error) => {
                self.report(request, &error);
                Vec::new()
            }
        }
    }

    fn report(&self, request: &SearchRequest, error: &CallError) {
        if self.diagnostics {
            warn!(
                query = %request.query,
                host = request.locale.host,
                provider_reported = error.is_provider_reported(),
                "search failed: {error}"
            );
        } else {
            debug!(query = %request.query, "search failed: {error}");
        }
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, request: &SearchRequest) -> Vec<String> {
        let outcome = self.request(request).await;
        self.settle(request, outcome)
    }
}
