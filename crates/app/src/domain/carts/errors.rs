//! Cart service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart line not found")]
    NotFound,

    #[error("not authorized")]
    Unauthorized,

    #[error("cart line has an unknown mode tag: {0}")]
    InvalidLineMode(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from cart service: {0}")]
    UnexpectedResponse(String),
}
