//! Payment-Return Reconciliation
//!
//! When the customer lands back from the hosted payment page, the order does
//! not exist yet. This module turns the return URL into a confirmed order:
//! verify the payment session, check whether the order was already submitted,
//! rebuild the order from its source, and submit it marked as paid.

use reqwest::Url;
use thiserror::Error;
use tracing::{info, warn};

use propbox::pricing::PricingError;

use crate::{
    checkout::{OrderSource, order_request, quote_from_cart_lines},
    context::AppContext,
    domain::{
        carts::CartsServiceError,
        orders::{
            OrdersServiceError,
            models::{OrderRequest, PaymentMethod, PaymentStatus, PlacedOrder},
        },
        payments::{
            PaymentsServiceError,
            models::{CheckoutSessionId, PaymentIntentId},
        },
    },
    session::Session,
};

/// Which storefront page the payment provider sent the customer back to.
///
/// The return page encodes where the order's lines live: the storefront page
/// means the live cart, the buy-now page means the session's own metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnPath {
    Storefront,
    BuyNow,
}

impl ReturnPath {
    fn from_url(url: &Url) -> Self {
        let last = url
            .path_segments()
            .and_then(|mut segments| segments.next_back());

        match last {
            Some("payment-buy") => Self::BuyNow,
            _ => Self::Storefront,
        }
    }
}

/// A parsed payment-provider return URL.
#[derive(Debug, Clone)]
pub struct PaymentReturn {
    pub path: ReturnPath,
    pub session_id: Option<CheckoutSessionId>,
}

impl PaymentReturn {
    /// Parse the page and `session_id` query parameter out of a return URL.
    ///
    /// A missing or empty `session_id` is preserved as `None` so the caller
    /// gets a precise error instead of a lookup against a blank id.
    pub fn from_return_url(url: &Url) -> Self {
        let session_id = url
            .query_pairs()
            .find(|(key, _)| key == "session_id")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .map(CheckoutSessionId::new);

        Self {
            path: ReturnPath::from_url(url),
            session_id,
        }
    }
}

/// Result of reconciling a payment return.
#[derive(Debug, Clone)]
pub enum ReturnOutcome {
    /// The order was already submitted for this payment; nothing was resent.
    AlreadyPlaced { payment_intent: PaymentIntentId },
    /// The order was submitted and confirmed as paid.
    Placed {
        order: PlacedOrder,
        /// Whether the source cart was cleared afterwards. Always false for
        /// buy-now returns, which never touch the cart.
        cart_cleared: bool,
    },
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The return URL carried no session id; nothing can be verified.
    #[error("return URL carries no session_id")]
    MissingSessionId,

    /// No customer session; the order cannot be attributed to anyone.
    #[error("not logged in")]
    NotLoggedIn,

    /// The payment session could not be verified with the provider.
    #[error("failed to verify payment session")]
    Verification(#[source] PaymentsServiceError),

    /// The duplicate check failed; submitting anyway could double-place.
    #[error("failed to check for an existing order")]
    IdempotencyProbe(#[source] OrdersServiceError),

    /// The cart emptied between payment and return; there is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A buy-now session arrived without its order metadata.
    #[error("payment session carries no order metadata")]
    MissingMetadata,

    #[error("failed to load cart")]
    Cart(#[source] CartsServiceError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The stored credentials were rejected mid-flow; the customer must log
    /// in again and revisit the return URL.
    #[error("authorization expired, log in and retry the return URL")]
    AuthorizationExpired,

    #[error("failed to submit the confirmed order")]
    Submission(#[source] OrdersServiceError),
}

/// Reconcile a hosted-payment return into a confirmed order.
///
/// The duplicate check always runs before any submission, so revisiting the
/// return URL is safe. Cart-sourced orders clear the cart afterwards; a
/// failed clear is reported, not retried.
///
/// # Errors
///
/// See [`ReconcileError`]; any step can fail and no failure is retried here.
#[tracing::instrument(
    name = "checkout.reconcile",
    skip(ctx, session, request),
    fields(path = ?request.path),
    err
)]
pub async fn reconcile(
    ctx: &AppContext,
    session: Option<&Session>,
    request: &PaymentReturn,
) -> Result<ReturnOutcome, ReconcileError> {
    let session_id = request
        .session_id
        .as_ref()
        .ok_or(ReconcileError::MissingSessionId)?;
    let session = session.ok_or(ReconcileError::NotLoggedIn)?;

    let payment_session = ctx
        .payments
        .payment_session(session, session_id)
        .await
        .map_err(|error| match error {
            PaymentsServiceError::Unauthorized => ReconcileError::AuthorizationExpired,
            other => ReconcileError::Verification(other),
        })?;

    let payment_intent = payment_session.payment_intent.clone();

    let exists = ctx
        .orders
        .order_exists(session, &payment_intent)
        .await
        .map_err(|error| match error {
            OrdersServiceError::Unauthorized => ReconcileError::AuthorizationExpired,
            other => ReconcileError::IdempotencyProbe(other),
        })?;

    if exists {
        info!(%payment_intent, "order already placed for this payment");

        return Ok(ReturnOutcome::AlreadyPlaced { payment_intent });
    }

    let (order, source) = match request.path {
        ReturnPath::Storefront => {
            let lines = ctx
                .carts
                .cart_lines(session)
                .await
                .map_err(|error| match error {
                    CartsServiceError::Unauthorized => ReconcileError::AuthorizationExpired,
                    other => ReconcileError::Cart(other),
                })?;

            if lines.is_empty() {
                return Err(ReconcileError::EmptyCart);
            }

            let quote = quote_from_cart_lines(lines)?;
            let order = order_request(
                session,
                &quote,
                PaymentMethod::Online,
                Some(payment_intent.clone()),
                Some(PaymentStatus::Done),
            );

            (order, OrderSource::Cart)
        }
        ReturnPath::BuyNow => {
            let metadata = payment_session
                .order
                .ok_or(ReconcileError::MissingMetadata)?;

            let order = OrderRequest {
                user_id: session.user_id.clone(),
                items: metadata.items,
                delivery_fee: metadata.delivery_fee,
                total_price: metadata.total_price,
                payment_method: PaymentMethod::Online,
                payment_intent: Some(payment_intent.clone()),
                payment_status: Some(PaymentStatus::Done),
            };

            (order, OrderSource::Direct)
        }
    };

    let placed = ctx
        .orders
        .create_order(session, &order)
        .await
        .map_err(|error| match error {
            OrdersServiceError::Unauthorized => ReconcileError::AuthorizationExpired,
            other => ReconcileError::Submission(other),
        })?;

    info!(order_id = %placed.id, %payment_intent, "confirmed paid order");

    let cart_cleared = match source {
        OrderSource::Cart => match ctx.carts.clear_cart(session).await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, order_id = %placed.id, "order placed but cart clear failed");

                false
            }
        },
        OrderSource::Direct => false,
    };

    Ok(ReturnOutcome::Placed {
        order: placed,
        cart_cleared,
    })
}
