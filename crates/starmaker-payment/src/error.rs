//! Payment client error types.

use thiserror::Error;

/// Result type for payment client operations.
///
/// Named apart from the `PaymentResult` model returned by confirmations.
pub type PaymentClientResult<T> = Result<T, PaymentError>;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Payment provider not configured")]
    NotConfigured,

    #[error("Payment API returned {0}: {1}")]
    ProviderError(u16, String),

    #[error("Card declined: {0}")]
    CardDeclined(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PaymentError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn card_declined(msg: impl Into<String>) -> Self {
        Self::CardDeclined(msg.into())
    }

    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        Self::ProviderError(status, body.into())
    }

    /// Check if this is a provider-side failure that simulation absorbs.
    ///
    /// Caller mistakes and card declines are surfaced instead.
    pub fn is_provider_failure(&self) -> bool {
        !matches!(
            self,
            PaymentError::InvalidArgument(_) | PaymentError::CardDeclined(_)
        )
    }
}
