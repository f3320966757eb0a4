//! Order service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("not authorized")]
    Unauthorized,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from order service: {0}")]
    UnexpectedResponse(String),
}
