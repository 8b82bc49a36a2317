//! Error types for prospectflow.
//!
//! Only configuration and input problems surface as [`ProspectError`].
//! Failures of individual network calls are classified as [`CallError`]
//! and absorbed by the adapter that made the call, so a single bad host
//! or provider hiccup never aborts a run.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ProspectError>;

/// The main error type for prospectflow operations.
#[derive(Debug, Error)]
pub enum ProspectError {
    /// A credential required for the run is not configured.
    #[error("missing credential {name}: {hint}")]
    MissingCredential {
        /// Environment variable name of the credential.
        name: &'static str,
        /// How the operator can supply it.
        hint: &'static str,
    },

    /// A configuration value is out of range or unparseable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The run was started without any niche to search.
    #[error("no niches given: enter at least one niche")]
    NoNiches,

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading or writing a CSV dataset failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProspectError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Failure of a single external call (search, fetch or enrichment).
///
/// Never crosses the adapter boundary; adapters log it and degrade to an
/// empty result.
#[derive(Debug, Error)]
pub enum CallError {
    /// Connection failure, timeout or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The provider reported an error in an otherwise valid response.
    #[error("provider error: {0}")]
    Provider(String),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl CallError {
    /// Whether the provider itself rejected the request (quota, bad query).
    #[must_use]
    pub const fn is_provider_reported(&self) -> bool {
        matches!(self, Self::Provider(_) | Self::Status(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message() {
        let err = ProspectError::MissingCredential {
            name: "SERPAPI_KEY",
            hint: "set it in the environment or pass --serpapi-key",
        };
        let msg = err.to_string();
        assert!(msg.contains("SERPAPI_KEY"));
        assert!(msg.contains("--serpapi-key"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: ProspectError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ProspectError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_call_error_classification() {
        assert!(CallError::Provider("quota exceeded".into()).is_provider_reported());
        assert!(CallError::Status(429).is_provider_reported());
        assert!(!CallError::Malformed("eof".into()).is_provider_reported());
    }
}
