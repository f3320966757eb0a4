//! Order Models

use propbox::lines::LineMode;

use crate::{
    domain::{catalog::models::PropId, payments::models::PaymentIntentId},
    ids::OpaqueId,
    session::UserId,
};

/// Order id issued by the order service.
pub type OrderId = OpaqueId<PlacedOrder>;

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Cash on delivery; the order is placed immediately.
    Cod,
    /// Hosted card payment; the order is placed after the payment returns.
    Online,
}

/// Payment progress recorded on an order at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// The hosted payment completed before the order was submitted.
    Done,
}

/// One ordered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub prop_id: PropId,
    pub mode: LineMode,
}

/// Order submission payload, constructed transiently at checkout or
/// reconciliation time and persisted by the order service.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    /// Delivery fee in minor units.
    pub delivery_fee: u64,
    /// Order total in minor units, delivery fee included.
    pub total_price: u64,
    pub payment_method: PaymentMethod,
    pub payment_intent: Option<PaymentIntentId>,
    pub payment_status: Option<PaymentStatus>,
}

/// Order as acknowledged by the order service.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub id: OrderId,
    /// Payment status label as reported by the order service.
    pub payment_status: Option<String>,
}
