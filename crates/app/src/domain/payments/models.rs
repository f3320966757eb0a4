//! Payment Models

use crate::{domain::orders::models::OrderItem, ids::OpaqueId};

/// Marker for payment-intent references.
pub struct PaymentIntent;

/// Payment-intent reference issued by the payment provider. Orders are keyed
/// on this for duplicate suppression.
pub type PaymentIntentId = OpaqueId<PaymentIntent>;

/// Marker for hosted checkout sessions.
pub struct CheckoutSession;

/// Hosted checkout session id; the only state that survives the redirect.
pub type CheckoutSessionId = OpaqueId<CheckoutSession>;

/// A hosted payment session, resolved when the customer returns from the
/// payment provider.
#[derive(Debug, Clone)]
pub struct PaymentSession {
    pub payment_intent: PaymentIntentId,
    /// Order contents carried in session metadata. Present on the buy-now
    /// path, where the session rather than the cart is the source of truth.
    pub order: Option<SessionOrder>,
}

/// Order contents embedded in payment-session metadata.
#[derive(Debug, Clone)]
pub struct SessionOrder {
    pub items: Vec<OrderItem>,
    /// Delivery fee in minor units.
    pub delivery_fee: u64,
    /// Order total in minor units.
    pub total_price: u64,
}
