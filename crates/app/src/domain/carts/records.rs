//! Cart Records

use serde::{Deserialize, Serialize};

/// Cart line as served by the cart service.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLineRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub prop_id: CartLinePropRecord,
    /// `"purchase"` or `"rental"`.
    #[serde(rename = "type")]
    pub mode: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, rename = "rentalDays")]
    pub rental_days: u32,
    #[serde(rename = "purchasePrice")]
    pub purchase_price: u64,
    #[serde(rename = "rentalPrice")]
    pub rental_price: u64,
    /// Server-computed line total in minor units.
    #[serde(rename = "totalPrice")]
    pub total_price: u64,
}

/// Prop reference embedded in a cart line.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLinePropRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Cart line mutation payload. The backend recomputes the line total.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineUpdateRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(rename = "rentalDays", skip_serializing_if = "Option::is_none")]
    pub rental_days: Option<u32>,
}

/// Envelope returned by cart line mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLineUpdatedRecord {
    pub cart: CartLineRecord,
}
