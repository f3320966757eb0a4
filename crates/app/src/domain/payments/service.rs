//! Payment service client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};

use crate::{
    config::ApiConfig,
    domain::{
        orders::{models::OrderRequest, records::OrderRequestRecord},
        payments::{
            errors::PaymentsServiceError,
            models::{CheckoutSessionId, PaymentIntentId, PaymentSession},
            records::{CheckoutSessionRecord, PaymentSessionRecord},
        },
    },
    session::Session,
};

/// HTTP client for the payment service.
#[derive(Debug, Clone)]
pub struct HttpPaymentsService {
    config: ApiConfig,
    http: Client,
}

impl HttpPaymentsService {
    #[must_use]
    pub fn new(config: ApiConfig, http: Client) -> Self {
        Self { config, http }
    }
}

#[async_trait]
impl PaymentsService for HttpPaymentsService {
    async fn payment_session(
        &self,
        session: &Session,
        id: &CheckoutSessionId,
    ) -> Result<PaymentSession, PaymentsServiceError> {
        let url = self.config.endpoint(&format!("api/payments/session/{id}"));

        let response = self
            .http
            .get(&url)
            .bearer_auth(session.token.expose())
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(PaymentsServiceError::NotFound);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PaymentsServiceError::Unauthorized);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentsServiceError::UnexpectedResponse(format!(
                "session lookup failed with status {status}: {text}"
            )));
        }

        let record: PaymentSessionRecord = response.json().await?;

        let order = record.metadata.map(|metadata| metadata.into_order()).transpose()?;

        Ok(PaymentSession {
            payment_intent: PaymentIntentId::new(record.payment_intent),
            order,
        })
    }

    async fn create_checkout_session(
        &self,
        session: &Session,
        order: &OrderRequest,
    ) -> Result<CheckoutSessionId, PaymentsServiceError> {
        let url = self.config.endpoint("api/payments/create-checkout-session");

        let response = self
            .http
            .post(&url)
            .bearer_auth(session.token.expose())
            .json(&OrderRequestRecord::from(order))
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PaymentsServiceError::Unauthorized);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentsServiceError::UnexpectedResponse(format!(
                "session creation failed with status {status}: {text}"
            )));
        }

        let record: CheckoutSessionRecord = response.json().await?;

        Ok(CheckoutSessionId::new(record.session_id))
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Resolve a hosted payment session by id on return from the provider.
    async fn payment_session(
        &self,
        session: &Session,
        id: &CheckoutSessionId,
    ) -> Result<PaymentSession, PaymentsServiceError>;

    /// Create a hosted checkout session for an order intent; the caller
    /// redirects the customer to it.
    async fn create_checkout_session(
        &self,
        session: &Session,
        order: &OrderRequest,
    ) -> Result<CheckoutSessionId, PaymentsServiceError>;
}
