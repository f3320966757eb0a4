//! App Context

use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;

use crate::{
    config::ApiConfig,
    domain::{
        carts::{CartsService, HttpCartsService},
        catalog::{CatalogService, HttpCatalogService},
        orders::{HttpOrdersService, OrdersService},
        payments::{HttpPaymentsService, PaymentsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
}

impl AppContext {
    /// Build application context for a backend base URL.
    ///
    /// All services share one HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_config(config: ApiConfig) -> Result<Self, AppInitError> {
        let http = Client::builder().build().map_err(AppInitError::HttpClient)?;

        Ok(Self {
            catalog: Arc::new(HttpCatalogService::new(config.clone(), http.clone())),
            carts: Arc::new(HttpCartsService::new(config.clone(), http.clone())),
            orders: Arc::new(HttpOrdersService::new(config.clone(), http.clone())),
            payments: Arc::new(HttpPaymentsService::new(config, http)),
        })
    }
}
