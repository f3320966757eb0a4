//! Catalog service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("prop not found")]
    NotFound,

    #[error("not authorized")]
    Unauthorized,

    #[error("prop has an invalid discount window")]
    InvalidDiscountWindow,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from catalog service: {0}")]
    UnexpectedResponse(String),
}
