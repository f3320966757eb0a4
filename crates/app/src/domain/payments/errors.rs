//! Payment service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    #[error("payment session not found")]
    NotFound,

    #[error("not authorized")]
    Unauthorized,

    #[error("invalid session metadata: {0}")]
    InvalidMetadata(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from payment service: {0}")]
    UnexpectedResponse(String),
}
