//! Error types for the enrichment path.
//!
//! None of these ever reach the analysis caller: the orchestrator converts
//! every one of them into a fallback to the local engine.

use thiserror::Error;

/// Errors that can occur while consulting the enrichment collaborator.
#[derive(Debug, Error, Clone)]
pub enum EnrichmentError {
    /// Network/HTTP transport failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// Collaborator returned a non-success HTTP status
    #[error("Enrichment request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    /// No API key configured, so the collaborator cannot be reached
    #[error("Enrichment collaborator not configured: {message}")]
    NotConfigured { message: String },

    /// Response body did not carry any generated text
    #[error("Unexpected response shape: {message}")]
    UnexpectedResponse { message: String },

    /// Generated text contained no array-shaped substring
    #[error("No JSON array found in enrichment response")]
    NoJsonArray,

    /// Array substring existed but did not parse as structured data
    #[error("Malformed enrichment payload: {message}")]
    Malformed { message: String },

    /// Base URL in the configuration is invalid
    #[error("Invalid enrichment URL: {message}")]
    UrlError { message: String },
}

impl EnrichmentError {
    /// Returns true if the failure came from the transport rather than from
    /// the response content. Purely informational: every variant triggers the
    /// same local fallback.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            EnrichmentError::Network { .. }
                | EnrichmentError::Http { .. }
                | EnrichmentError::NotConfigured { .. }
        )
    }
}

impl From<reqwest::Error> for EnrichmentError {
    fn from(err: reqwest::Error) -> Self {
        EnrichmentError::Network {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for EnrichmentError {
    fn from(err: url::ParseError) -> Self {
        EnrichmentError::UrlError {
            message: err.to_string(),
        }
    }
}
