//! Configuration for a prospecting run.
//!
//! [`ProspectConfig`] is assembled once at process start (defaults, an
//! optional JSON file, the environment, then command-line overrides) and
//! handed by reference to the components that need it. Nothing reads
//! ambient global state after that point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::domain::WILDCARD_TLD;
use crate::errors::{ProspectError, Result};
use crate::search::SearchStrategy;

/// Environment variable holding the search API key.
pub const SERPAPI_KEY_ENV: &str = "SERPAPI_KEY";

/// Environment variable holding the enrichment API key.
pub const HUNTER_KEY_ENV: &str = "HUNTER_API_KEY";

/// Largest accepted `per_niche` value.
pub const MAX_PER_NICHE: usize = 200;

/// API keys for the external services.
///
/// Never serialized; `Debug` redacts the values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Search API key. Required for a run.
    pub serpapi_key: Option<String>,
    /// Enrichment API key. Optional; without it the email fallback is off.
    pub hunter_key: Option<String>,
}

impl Credentials {
    /// Reads keys from the process environment, loading `.env` if present.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            serpapi_key: non_empty(std::env::var(SERPAPI_KEY_ENV).ok()),
            hunter_key: non_empty(std::env::var(HUNTER_KEY_ENV).ok()),
        }
    }

    /// Overrides the search key when `key` is non-blank.
    #[must_use]
    pub fn with_serpapi_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = non_empty(key) {
            self.serpapi_key = Some(key);
        }
        self
    }

    /// Overrides the enrichment key when `key` is non-blank.
    #[must_use]
    pub fn with_hunter_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = non_empty(key) {
            self.hunter_key = Some(key);
        }
        self
    }

    /// Returns the search key or the fatal missing-credential error.
    pub fn require_serpapi_key(&self) -> Result<&str> {
        self.serpapi_key
            .as_deref()
            .ok_or(ProspectError::MissingCredential {
                name: SERPAPI_KEY_ENV,
                hint: "set it in the environment, a .env file, or pass --serpapi-key",
            })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "***");
        f.debug_struct("Credentials")
            .field("serpapi_key", &redact(&self.serpapi_key))
            .field("hunter_key", &redact(&self.hunter_key))
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration for outbound HTTP calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchConfig {
    /// Page fetch timeout in seconds.
    #[serde(default = "default_page_timeout")]
    pub page_timeout_seconds: f64,
    /// Search request timeout in seconds.
    #[serde(default = "default_search_timeout")]
    pub search_timeout_seconds: f64,
    /// Enrichment request timeout in seconds.
    #[serde(default = "default_enrichment_timeout")]
    pub enrichment_timeout_seconds: f64,
    /// Maximum number of redirects to follow.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_page_timeout() -> f64 {
    25.0
}

fn default_search_timeout() -> f64 {
    30.0
}

fn default_enrichment_timeout() -> f64 {
    20.0
}

fn default_max_redirects() -> usize {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126 Safari/537.36"
        .to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_timeout_seconds: default_page_timeout(),
            search_timeout_seconds: default_search_timeout(),
            enrichment_timeout_seconds: default_enrichment_timeout(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    /// Creates a new fetch configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page fetch timeout.
    #[must_use]
    pub fn with_page_timeout(mut self, seconds: f64) -> Self {
        self.page_timeout_seconds = seconds;
        self
    }

    /// Page fetch timeout as a Duration.
    pub fn page_timeout(&self) -> Result<Duration> {
        seconds("page_timeout_seconds", self.page_timeout_seconds)
    }

    /// Search timeout as a Duration.
    pub fn search_timeout(&self) -> Result<Duration> {
        seconds("search_timeout_seconds", self.search_timeout_seconds)
    }

    /// Enrichment timeout as a Duration.
    pub fn enrichment_timeout(&self) -> Result<Duration> {
        seconds("enrichment_timeout_seconds", self.enrichment_timeout_seconds)
    }

    fn validate(&self) -> Result<()> {
        self.page_timeout()?;
        self.search_timeout()?;
        self.enrichment_timeout()?;
        Ok(())
    }
}

fn seconds(name: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value)
        .ok()
        .filter(|duration| !duration.is_zero())
        .ok_or_else(|| {
            ProspectError::invalid_config(format!(
                "{name} must be a positive number of seconds, got {value}"
            ))
        })
}

/// Settings that shape the discovery phase of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Websites wanted per niche (1..=200).
    #[serde(default = "default_per_niche")]
    pub per_niche: usize,
    /// Query template strategy.
    #[serde(default)]
    pub strategy: SearchStrategy,
    /// Suffix allow-list, e.g. `[".com", ".co.uk"]`; `.any` accepts all.
    #[serde(default = "default_allowed_tlds")]
    pub allowed_tlds: Vec<String>,
    /// Surface provider errors as warnings.
    #[serde(default)]
    pub diagnostics: bool,
    /// Pause after each niche's query fan-out, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub niche_delay_ms: u64,
}

fn default_per_niche() -> usize {
    30
}

fn default_allowed_tlds() -> Vec<String> {
    vec![WILDCARD_TLD.to_string()]
}

fn default_delay_ms() -> u64 {
    800
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            per_niche: default_per_niche(),
            strategy: SearchStrategy::default(),
            allowed_tlds: default_allowed_tlds(),
            diagnostics: false,
            niche_delay_ms: default_delay_ms(),
        }
    }
}

impl RunConfig {
    /// Creates a new run configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of websites wanted per niche.
    #[must_use]
    pub const fn with_per_niche(mut self, per_niche: usize) -> Self {
        self.per_niche = per_niche;
        self
    }

    /// Sets the search strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replaces the suffix allow-list.
    #[must_use]
    pub fn with_allowed_tlds<I, S>(mut self, tlds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tlds = tlds.into_iter().map(Into::into).collect();
        self
    }

    /// Enables provider diagnostics.
    #[must_use]
    pub const fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Sets the pause after each niche.
    #[must_use]
    pub const fn with_niche_delay_ms(mut self, delay_ms: u64) -> Self {
        self.niche_delay_ms = delay_ms;
        self
    }

    /// Pause after each niche as a Duration.
    #[must_use]
    pub const fn niche_delay(&self) -> Duration {
        Duration::from_millis(self.niche_delay_ms)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_PER_NICHE).contains(&self.per_niche) {
            return Err(ProspectError::invalid_config(format!(
                "per_niche must be between 1 and {MAX_PER_NICHE}, got {}",
                self.per_niche
            )));
        }
        Ok(())
    }
}

/// Complete, immutable configuration of one process.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProspectConfig {
    /// API keys; supplied by the environment or flags only.
    #[serde(skip)]
    pub credentials: Credentials,
    /// HTTP settings.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Discovery settings.
    #[serde(default)]
    pub run: RunConfig,
}

impl ProspectConfig {
    /// Creates a configuration with defaults and no credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads fetch and run settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Sets the credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Sets the run settings.
    #[must_use]
    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }

    /// Checks ranges and the required search credential.
    pub fn validate(&self) -> Result<()> {
        self.credentials.require_serpapi_key()?;
        self.fetch.validate()?;
        self.run.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keyed() -> Credentials {
        Credentials::default().with_serpapi_key(Some("serp-key".into()))
    }

    #[test]
    fn test_fetch_config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.page_timeout().unwrap(), Duration::from_secs(25));
        assert_eq!(config.search_timeout().unwrap(), Duration::from_secs(30));
        assert_eq!(config.enrichment_timeout().unwrap(), Duration::from_secs(20));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.per_niche, 30);
        assert_eq!(config.strategy, SearchStrategy::Balanced);
        assert_eq!(config.allowed_tlds, vec![".any".to_string()]);
        assert_eq!(config.niche_delay(), Duration::from_millis(800));
        assert!(!config.diagnostics);
    }

    #[test]
    fn test_run_config_builder() {
        let config = RunConfig::new()
            .with_per_niche(50)
            .with_strategy(SearchStrategy::Lean)
            .with_allowed_tlds([".lv", ".co.uk"])
            .with_diagnostics(true)
            .with_niche_delay_ms(0);
        assert_eq!(config.per_niche, 50);
        assert_eq!(config.allowed_tlds, vec![".lv".to_string(), ".co.uk".to_string()]);
        assert!(config.diagnostics);
        assert_eq!(config.niche_delay(), Duration::ZERO);
    }

    #[test]
    fn test_missing_search_key_is_fatal() {
        let err = ProspectConfig::new().validate().unwrap_err();
        assert!(matches!(err, ProspectError::MissingCredential { name: SERPAPI_KEY_ENV, .. }));
    }

    #[test]
    fn test_blank_key_override_is_ignored() {
        let credentials = keyed().with_serpapi_key(Some("   ".into()));
        assert_eq!(credentials.serpapi_key.as_deref(), Some("serp-key"));
    }

    #[test]
    fn test_per_niche_range() {
        let config = ProspectConfig::new()
            .with_credentials(keyed())
            .with_run(RunConfig::new().with_per_niche(0));
        assert!(matches!(config.validate(), Err(ProspectError::InvalidConfig(_))));

        let config = config.with_run(RunConfig::new().with_per_niche(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unusable_timeouts_rejected() {
        for value in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            let fetch = FetchConfig::new().with_page_timeout(value);
            let err = fetch.page_timeout().unwrap_err();
            assert!(matches!(err, ProspectError::InvalidConfig(_)), "{value}");
            assert!(fetch.search_timeout().is_ok());

            let mut config = ProspectConfig::new().with_credentials(keyed());
            config.fetch = fetch;
            assert!(matches!(config.validate(), Err(ProspectError::InvalidConfig(_))), "{value}");
        }
        let fetch = FetchConfig::new().with_page_timeout(0.5);
        assert_eq!(fetch.page_timeout().unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn test_credentials_debug_redacts() {
        let shown = format!("{:?}", keyed());
        assert!(!shown.contains("serp-key"));
        assert!(shown.contains("***"));
    }

    #[test]
    fn test_json_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prospect.json");
        std::fs::write(
            &path,
            r#"{"run": {"strategy": "aggressive", "allowed_tlds": [".de"]}, "fetch": {"page_timeout_seconds": 5}}"#,
        )
        .unwrap();

        let config = ProspectConfig::from_json_file(&path).unwrap();
        assert_eq!(config.run.strategy, SearchStrategy::Aggressive);
        assert_eq!(config.run.allowed_tlds, vec![".de".to_string()]);
        assert_eq!(config.run.per_niche, 30);
        assert_eq!(config.fetch.page_timeout().unwrap(), Duration::from_secs(5));
        assert_eq!(config.fetch.search_timeout().unwrap(), Duration::from_secs(30));
        assert!(config.credentials.serpapi_key.is_none());
    }
}
