//! Email extraction from page text with a domain-search fallback.

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::config::ProspectConfig;
use crate::errors::{CallError, Result};
use crate::models::RootDomain;

/// Pattern for email addresses found in visible page text.
pub const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

/// Default Hunter domain-search endpoint.
pub const HUNTER_ENDPOINT: &str = "https://api.hunter.io/v2/domain-search";

/// Most addresses taken from the enrichment service per domain.
pub const MAX_ENRICHED_EMAILS: usize = 10;

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

/// Distinct email addresses in `text`, sorted, case preserved.
#[must_use]
pub fn extract_emails(text: &str) -> Vec<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Protocol for services that look up addresses published for a domain.
///
/// Implementations never fail towards the caller; any failure is an
/// empty list.
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    /// Addresses known for `domain`, at most [`MAX_ENRICHED_EMAILS`].
    async fn lookup(&self, domain: &RootDomain) -> Vec<String>;
}

/// Enrichment provider that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

#[async_trait]
impl EnrichmentProvider for NoEnrichment {
    async fn lookup(&self, _domain: &RootDomain) -> Vec<String> {
        Vec::new()
    }
}

#[derive(Debug, Deserialize)]
struct DomainSearchResponse {
    #[serde(default)]
    data: Option<DomainSearchData>,
}

#[derive(Debug, Deserialize)]
struct DomainSearchData {
    #[serde(default)]
    emails: Vec<DomainSearchEmail>,
}

#[derive(Debug, Deserialize)]
struct DomainSearchEmail {
    #[serde(default)]
    value: Option<String>,
}

/// Extracts distinct addresses from a Hunter domain-search body.
///
/// Keeps response order and stops after `limit` values.
pub fn parse_domain_search(
    body: &str,
    limit: usize,
) -> std::result::Result<Vec<String>, CallError> {
    let response: DomainSearchResponse =
        serde_json::from_str(body).map_err(|e| CallError::Malformed(e.to_string()))?;

    let mut emails: Vec<String> = Vec::new();
    let values = response
        .data
        .map(|data| data.emails)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|email| email.value.filter(|v| !v.is_empty()));
    for value in values {
        if emails.len() >= limit {
            break;
        }
        if !emails.contains(&value) {
            emails.push(value);
        }
    }
    Ok(emails)
}

/// Interprets a domain-search answer. Only HTTP 200 carries results.
pub fn interpret_domain_search(
    status: u16,
    body: &str,
    limit: usize,
) -> std::result::Result<Vec<String>, CallError> {
    if status != StatusCode::OK.as_u16() {
        return Err(CallError::Status(status));
    }
    parse_domain_search(body, limit)
}

/// Hunter.io domain search.
///
/// Without an API key the client is disabled and every lookup is empty.
#[derive(Debug, Clone)]
pub struct HunterClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    diagnostics: bool,
}

impl HunterClient {
    /// Creates a client from the process configuration.
    pub fn new(config: &ProspectConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.fetch.enrichment_timeout()?)
            .user_agent(config.fetch.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            api_key: config.credentials.hunter_key.clone(),
            endpoint: HUNTER_ENDPOINT.to_string(),
            diagnostics: config.run.diagnostics,
        })
    }

    /// Points the client at another endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Whether lookups will reach the service.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn request(
        &self,
        api_key: &str,
        domain: &RootDomain,
    ) -> std::result::Result<Vec<String>, CallError> {
        let limit = MAX_ENRICHED_EMAILS.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("domain", domain.as_str()), ("api_key", api_key), ("limit", limit.as_str())])
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        interpret_domain_search(status, &body, MAX_ENRICHED_EMAILS)
    }

    fn settle(
        &self,
        domain: &RootDomain,
        outcome: std::result::Result<Vec<String>, CallError>,
    ) -> Vec<String> {
        match outcome {
            Ok(emails) => {
                debug!(%domain, found = emails.len(), "enrichment lookup complete");
                emails
            }
            Err(error) if self.diagnostics => {
                warn!(
                    %domain,
                    provider_reported = error.is_provider_reported(),
                    "enrichment failed: {error}"
                );
                Vec::new()
            }
            Err(error) => {
                debug!(%domain, "enrichment failed: {error}");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl EnrichmentProvider for HunterClient {
    async fn lookup(&self, domain: &RootDomain) -> Vec<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Vec::new();
        };
        let outcome = self.request(api_key, domain).await;
        self.settle(domain, outcome)
    }
}

/// Emails for a site: addresses in its text, else the enrichment lookup.
///
/// The enrichment provider is only consulted when the text holds none.
pub async fn resolve_emails(
    text: &str,
    domain: &RootDomain,
    enrichment: &dyn EnrichmentProvider,
) -> Vec<String> {
    let found = extract_emails(text);
    if !found.is_empty() {
        return found;
    }
    enrichment.lookup(domain).await
}
