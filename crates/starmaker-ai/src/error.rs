//! AI client error types.

use thiserror::Error;

/// Result type for AI client operations.
pub type AiResult<T> = Result<T, AiError>;

/// Errors that can occur while talking to the AI providers.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Provider returned {0}: {1}")]
    ProviderError(u16, String),

    #[error("Failed to parse provider response: {0}")]
    ParseError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AiError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Build an error from a non-success HTTP status.
    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        Self::ProviderError(status, body.into())
    }

    /// HTTP status code if the provider answered.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            AiError::ProviderError(status, _) => Some(*status),
            AiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a provider-side failure that simulation absorbs.
    ///
    /// Caller mistakes (`InvalidArgument`) are never absorbed.
    pub fn is_provider_failure(&self) -> bool {
        !matches!(self, AiError::InvalidArgument(_))
    }
}
