//! Order service client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};

use crate::{
    config::ApiConfig,
    domain::{
        orders::{
            errors::OrdersServiceError,
            models::{OrderId, OrderRequest, PlacedOrder},
            records::{OrderExistsRecord, OrderRecord, OrderRequestRecord},
        },
        payments::models::PaymentIntentId,
    },
    session::Session,
};

/// HTTP client for the order service.
#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    config: ApiConfig,
    http: Client,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(config: ApiConfig, http: Client) -> Self {
        Self { config, http }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn create_order(
        &self,
        session: &Session,
        order: &OrderRequest,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        let url = self.config.endpoint("api/orders");

        let response = self
            .http
            .post(&url)
            .bearer_auth(session.token.expose())
            .json(&OrderRequestRecord::from(order))
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(OrdersServiceError::Unauthorized);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(OrdersServiceError::UnexpectedResponse(format!(
                "order submission failed with status {status}: {text}"
            )));
        }

        let record: OrderRecord = response.json().await?;

        Ok(PlacedOrder {
            id: OrderId::new(record.id),
            payment_status: record.payment_status,
        })
    }

    async fn order_exists(
        &self,
        session: &Session,
        payment_intent: &PaymentIntentId,
    ) -> Result<bool, OrdersServiceError> {
        let url = self
            .config
            .endpoint(&format!("api/orders/check/{payment_intent}"));

        let response = self
            .http
            .get(&url)
            .bearer_auth(session.token.expose())
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(OrdersServiceError::Unauthorized);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(OrdersServiceError::UnexpectedResponse(format!(
                "order existence probe failed with status {status}: {text}"
            )));
        }

        let record: OrderExistsRecord = response.json().await?;

        Ok(record.exists)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Submit an order for persistence.
    async fn create_order(
        &self,
        session: &Session,
        order: &OrderRequest,
    ) -> Result<PlacedOrder, OrdersServiceError>;

    /// Whether an order already exists for a payment-intent reference.
    async fn order_exists(
        &self,
        session: &Session,
        payment_intent: &PaymentIntentId,
    ) -> Result<bool, OrdersServiceError>;
}
