//! Cart service client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};

use crate::{
    config::ApiConfig,
    domain::carts::{
        errors::CartsServiceError,
        models::{CartLine, CartLineId, CartLineUpdate},
        records::{CartLineRecord, CartLineUpdateRecord, CartLineUpdatedRecord},
    },
    session::Session,
};

/// HTTP client for the cart service.
#[derive(Debug, Clone)]
pub struct HttpCartsService {
    config: ApiConfig,
    http: Client,
}

impl HttpCartsService {
    #[must_use]
    pub fn new(config: ApiConfig, http: Client) -> Self {
        Self { config, http }
    }

    fn classify(status: StatusCode) -> Option<CartsServiceError> {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Some(CartsServiceError::Unauthorized);
        }

        if status == StatusCode::NOT_FOUND {
            return Some(CartsServiceError::NotFound);
        }

        None
    }
}

#[async_trait]
impl CartsService for HttpCartsService {
    async fn cart_lines(&self, session: &Session) -> Result<Vec<CartLine>, CartsServiceError> {
        let url = self
            .config
            .endpoint(&format!("api/cart/{}", session.user_id));

        let response = self
            .http
            .get(&url)
            .bearer_auth(session.token.expose())
            .send()
            .await?;

        let status = response.status();

        // A customer with no cart yet gets a 404; that is just an empty cart.
        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CartsServiceError::Unauthorized);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(CartsServiceError::UnexpectedResponse(format!(
                "cart fetch failed with status {status}: {text}"
            )));
        }

        let records: Vec<CartLineRecord> = response.json().await?;

        records.into_iter().map(CartLine::try_from).collect()
    }

    async fn update_line(
        &self,
        session: &Session,
        id: &CartLineId,
        update: CartLineUpdate,
    ) -> Result<CartLine, CartsServiceError> {
        let url = self.config.endpoint(&format!("api/cart/update/{id}"));

        let payload = match update {
            CartLineUpdate::Quantity(quantity) => CartLineUpdateRecord {
                quantity: Some(quantity),
                rental_days: None,
            },
            CartLineUpdate::RentalDays(days) => CartLineUpdateRecord {
                quantity: None,
                rental_days: Some(days),
            },
        };

        let response = self
            .http
            .patch(&url)
            .bearer_auth(session.token.expose())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();

        if let Some(error) = Self::classify(status) {
            return Err(error);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(CartsServiceError::UnexpectedResponse(format!(
                "cart update failed with status {status}: {text}"
            )));
        }

        let updated: CartLineUpdatedRecord = response.json().await?;

        CartLine::try_from(updated.cart)
    }

    async fn remove_line(
        &self,
        session: &Session,
        id: &CartLineId,
    ) -> Result<(), CartsServiceError> {
        let url = self.config.endpoint(&format!("api/cart/remove/{id}"));

        let response = self
            .http
            .delete(&url)
            .bearer_auth(session.token.expose())
            .send()
            .await?;

        let status = response.status();

        if let Some(error) = Self::classify(status) {
            return Err(error);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(CartsServiceError::UnexpectedResponse(format!(
                "cart removal failed with status {status}: {text}"
            )));
        }

        Ok(())
    }

    async fn clear_cart(&self, session: &Session) -> Result<(), CartsServiceError> {
        let url = self
            .config
            .endpoint(&format!("api/cart/clear/{}", session.user_id));

        let response = self
            .http
            .delete(&url)
            .bearer_auth(session.token.expose())
            .send()
            .await?;

        let status = response.status();

        if let Some(error) = Self::classify(status) {
            return Err(error);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(CartsServiceError::UnexpectedResponse(format!(
                "cart clear failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Current cart lines for the logged-in customer. A customer without a
    /// cart has an empty one.
    async fn cart_lines(&self, session: &Session) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Change a line's quantity or rental duration. The backend recomputes
    /// and returns the updated line.
    async fn update_line(
        &self,
        session: &Session,
        id: &CartLineId,
        update: CartLineUpdate,
    ) -> Result<CartLine, CartsServiceError>;

    /// Remove a single line from the cart.
    async fn remove_line(&self, session: &Session, id: &CartLineId)
    -> Result<(), CartsServiceError>;

    /// Remove every line from the customer's cart.
    async fn clear_cart(&self, session: &Session) -> Result<(), CartsServiceError>;
}
