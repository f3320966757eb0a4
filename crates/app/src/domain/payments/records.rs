//! Payment Records

use serde::Deserialize;

use crate::domain::{
    orders::records::OrderItemRecord,
    payments::{errors::PaymentsServiceError, models::SessionOrder},
};

/// Payment session as returned by the payment service.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentSessionRecord {
    pub payment_intent: String,
    #[serde(default)]
    pub metadata: Option<SessionMetadataRecord>,
}

/// Provider metadata blob. Every value is a string; `items` is itself a
/// JSON-encoded array.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionMetadataRecord {
    pub items: String,
    #[serde(rename = "deliveryFee")]
    pub delivery_fee: String,
    pub total_price: String,
}

impl SessionMetadataRecord {
    /// Decode the stringly metadata into order contents.
    pub(crate) fn into_order(self) -> Result<SessionOrder, PaymentsServiceError> {
        let records: Vec<OrderItemRecord> = serde_json::from_str(&self.items)
            .map_err(|error| PaymentsServiceError::InvalidMetadata(error.to_string()))?;

        let items = records
            .into_iter()
            .map(|record| {
                let tag = record.mode.clone();

                record.into_item().ok_or_else(|| {
                    PaymentsServiceError::InvalidMetadata(format!("unknown mode tag: {tag}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let delivery_fee = self.delivery_fee.parse::<u64>().map_err(|error| {
            PaymentsServiceError::InvalidMetadata(format!("deliveryFee: {error}"))
        })?;

        let total_price = self.total_price.parse::<u64>().map_err(|error| {
            PaymentsServiceError::InvalidMetadata(format!("total_price: {error}"))
        })?;

        Ok(SessionOrder {
            items,
            delivery_fee,
            total_price,
        })
    }
}

/// Response of checkout-session creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionRecord {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}
