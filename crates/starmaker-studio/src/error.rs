//! Studio error types.

use thiserror::Error;

pub type StudioResult<T> = Result<T, StudioError>;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("AI error: {0}")]
    Ai(#[from] starmaker_ai::AiError),

    #[error("Video error: {0}")]
    Video(#[from] starmaker_video::VideoError),

    #[error("Payment error: {0}")]
    Payment(#[from] starmaker_payment::PaymentError),
}

impl StudioError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether the caller supplied bad input, at any layer.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            StudioError::InvalidArgument(_) => true,
            StudioError::Ai(e) => !e.is_provider_failure(),
            StudioError::Video(e) => matches!(e, starmaker_video::VideoError::InvalidArgument(_)),
            StudioError::Payment(e) => {
                matches!(e, starmaker_payment::PaymentError::InvalidArgument(_))
            }
        }
    }
}
