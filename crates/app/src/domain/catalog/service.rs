//! Catalog service client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};

use crate::{
    config::ApiConfig,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{Prop, PropId},
        records::PropRecord,
    },
    session::Session,
};

/// HTTP client for the catalog service.
#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    config: ApiConfig,
    http: Client,
}

impl HttpCatalogService {
    #[must_use]
    pub fn new(config: ApiConfig, http: Client) -> Self {
        Self { config, http }
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn get_prop(&self, session: &Session, id: &PropId) -> Result<Prop, CatalogServiceError> {
        let url = self.config.endpoint(&format!("api/props/{id}"));

        let response = self
            .http
            .get(&url)
            .bearer_auth(session.token.expose())
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogServiceError::NotFound);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CatalogServiceError::Unauthorized);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogServiceError::UnexpectedResponse(format!(
                "prop lookup failed with status {status}: {text}"
            )));
        }

        let record: PropRecord = response.json().await?;

        Prop::try_from(record)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve a single prop.
    async fn get_prop(&self, session: &Session, id: &PropId) -> Result<Prop, CatalogServiceError>;
}
