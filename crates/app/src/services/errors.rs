//! Service errors.

use thiserror::Error;

const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Failure reported by an external service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service refused the request, with its message when one was sent.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The service could not be reached or failed internally.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with something this client cannot use.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Message to show the operator: the server's own message when it sent one.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected(message) if !message.trim().is_empty() => message,
            Self::Rejected(_) | Self::Unavailable(_) | Self::InvalidResponse(_) => {
                GENERIC_MESSAGE
            }
        }
    }
}
