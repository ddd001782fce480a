//! Video generation error types.

use thiserror::Error;

pub type VideoResult<T> = Result<T, VideoError>;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Provider returned {0}: {1}")]
    ProviderError(u16, String),

    #[error("Failed to combine clips: {0}")]
    CombineFailed(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VideoError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn combine_failed(msg: impl Into<String>) -> Self {
        Self::CombineFailed(msg.into())
    }

    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        Self::ProviderError(status, body.into())
    }

    /// Check if this is a provider-side failure that simulation absorbs.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            VideoError::NotConfigured(_)
                | VideoError::ProviderError(..)
                | VideoError::Network(_)
                | VideoError::Json(_)
        )
    }
}
