//! Catalog Records

use jiff::Timestamp;
use serde::Deserialize;

/// Prop as served by the catalog service.
#[derive(Debug, Clone, Deserialize)]
pub struct PropRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Vec<String>,
    /// Unit purchase price in minor units.
    pub purchase_price: u64,
    /// Weekly rental price in minor units.
    pub rental_price: u64,
    #[serde(default)]
    pub available_stock: u32,
    /// `"yes"`/`"no"`; absent means available.
    #[serde(default)]
    pub availability_status: Option<String>,
    #[serde(default, rename = "hasDiscount")]
    pub has_discount: bool,
    /// Discount as a percentage of the unit price, e.g. `20.0`.
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub discount_start: Option<Timestamp>,
    #[serde(default)]
    pub discount_end: Option<Timestamp>,
}
