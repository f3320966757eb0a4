//! Checkout
//!
//! Builds priced order snapshots (from the live cart or a direct buy-now
//! selection) and places them, either immediately for cash-on-delivery or by
//! handing the customer off to a hosted payment session.

use jiff::Timestamp;
use rusty_money::{Money, iso};
use thiserror::Error;
use tracing::{info, warn};

use propbox::{
    lines::LineMode,
    pricing::{self, PricingError},
};

use crate::{
    context::AppContext,
    domain::{
        carts::{CartsServiceError, models::CartLine},
        catalog::{CatalogServiceError, models::PropId},
        orders::{
            OrdersServiceError,
            models::{OrderItem, OrderRequest, PaymentMethod, PaymentStatus, PlacedOrder},
        },
        payments::{
            PaymentsServiceError,
            models::{CheckoutSessionId, PaymentIntentId},
        },
    },
    session::Session,
};

pub mod reconcile;

/// The single store currency; wire amounts are minor units of this.
pub(crate) const STORE_CURRENCY: &iso::Currency = iso::PKR;

/// Where an order's line items come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSource {
    /// The customer's live cart; cleared once the order is placed.
    Cart,
    /// A direct buy-now selection that never touches the cart.
    Direct,
}

/// A priced order line ready for submission.
#[derive(Debug, Clone)]
pub struct QuoteLine {
    pub prop_id: PropId,
    pub prop_name: String,
    pub mode: LineMode,
    /// Line total in minor units.
    pub total_price: u64,
}

/// A priced snapshot of an order about to be placed.
#[derive(Debug, Clone)]
pub struct CheckoutQuote {
    pub source: OrderSource,
    pub lines: Vec<QuoteLine>,
    /// Sum of line totals in minor units.
    pub subtotal: u64,
    /// Delivery fee in minor units.
    pub delivery_fee: u64,
    /// Subtotal plus delivery fee, in minor units.
    pub total: u64,
}

impl CheckoutQuote {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Result of a checkout attempt.
#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    /// The order was placed immediately (cash on delivery).
    Placed(PlacedOrder),
    /// The customer must complete payment at the hosted session.
    PaymentRedirect(CheckoutSessionId),
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to check out; no request was made.
    #[error("cannot check out an empty order")]
    EmptyCart,

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("failed to load prop")]
    Catalog(#[from] CatalogServiceError),

    #[error("failed to load cart")]
    Carts(#[from] CartsServiceError),

    #[error("failed to place order")]
    Orders(#[from] OrdersServiceError),

    #[error("failed to create payment session")]
    Payments(#[from] PaymentsServiceError),
}

/// Priced snapshot of the customer's live cart.
///
/// Line totals are the server-computed ones; only the delivery fee and order
/// total are derived here.
///
/// # Errors
///
/// Returns an error when the cart cannot be loaded or totals overflow.
pub async fn cart_quote(
    ctx: &AppContext,
    session: &Session,
) -> Result<CheckoutQuote, CheckoutError> {
    let lines = ctx.carts.cart_lines(session).await?;

    Ok(quote_from_cart_lines(lines)?)
}

/// Priced single-line snapshot for a direct buy-now selection.
///
/// The prop is fetched from the catalog and priced locally, applying any
/// discount active right now.
///
/// # Errors
///
/// Returns an error when the prop cannot be loaded or priced.
pub async fn buy_now_quote(
    ctx: &AppContext,
    session: &Session,
    prop_id: &PropId,
    mode: LineMode,
) -> Result<CheckoutQuote, CheckoutError> {
    let prop = ctx.catalog.get_prop(session, prop_id).await?;

    let purchase_price = Money::from_minor(to_minor(prop.purchase_price)?, STORE_CURRENCY);
    let rental_price = Money::from_minor(to_minor(prop.rental_price)?, STORE_CURRENCY);

    let total = pricing::line_total(
        &purchase_price,
        &rental_price,
        &mode,
        prop.discount.as_ref(),
        Timestamp::now(),
    )?;

    let line = QuoteLine {
        prop_id: prop.id,
        prop_name: prop.name,
        mode,
        total_price: from_minor(total.to_minor_units())?,
    };

    Ok(build_quote(OrderSource::Direct, vec![line])?)
}

/// Place an order for a priced snapshot.
///
/// Cash on delivery submits the order immediately and clears the cart for
/// cart-sourced quotes. Online payment creates a hosted checkout session and
/// returns its id; the order itself is only created after the payment
/// returns. Failures leave the cart untouched and are never retried.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: The quote has no lines; nothing was sent.
/// - [`CheckoutError::Orders`] / [`CheckoutError::Payments`]: The backend
///   rejected the submission.
#[tracing::instrument(
    name = "checkout.place",
    skip(ctx, session, quote),
    fields(source = ?quote.source, lines = quote.lines.len()),
    err
)]
pub async fn checkout(
    ctx: &AppContext,
    session: &Session,
    quote: &CheckoutQuote,
    method: PaymentMethod,
) -> Result<CheckoutOutcome, CheckoutError> {
    if quote.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    match method {
        PaymentMethod::Cod => {
            let order = order_request(session, quote, PaymentMethod::Cod, None, None);
            let placed = ctx.orders.create_order(session, &order).await?;

            if quote.source == OrderSource::Cart {
                if let Err(error) = ctx.carts.clear_cart(session).await {
                    warn!(%error, order_id = %placed.id, "order placed but cart clear failed");
                }
            }

            info!(order_id = %placed.id, "placed cash-on-delivery order");

            Ok(CheckoutOutcome::Placed(placed))
        }
        PaymentMethod::Online => {
            let order = order_request(session, quote, PaymentMethod::Online, None, None);
            let session_id = ctx.payments.create_checkout_session(session, &order).await?;

            info!(%session_id, "created hosted checkout session");

            Ok(CheckoutOutcome::PaymentRedirect(session_id))
        }
    }
}

/// Assemble a quote from server-priced cart lines.
pub(crate) fn quote_from_cart_lines(
    lines: Vec<CartLine>,
) -> Result<CheckoutQuote, PricingError> {
    let lines = lines
        .into_iter()
        .map(|line| QuoteLine {
            prop_id: line.prop_id,
            prop_name: line.prop_name,
            mode: line.mode,
            total_price: line.total_price,
        })
        .collect();

    build_quote(OrderSource::Cart, lines)
}

fn build_quote(source: OrderSource, lines: Vec<QuoteLine>) -> Result<CheckoutQuote, PricingError> {
    let subtotal = pricing::subtotal(lines.iter().map(|line| line.total_price))?;
    let delivery_fee = pricing::delivery_fee(lines.len());
    let total = pricing::order_total(subtotal, delivery_fee)?;

    Ok(CheckoutQuote {
        source,
        lines,
        subtotal,
        delivery_fee,
        total,
    })
}

/// Build the order submission payload for a quote.
pub(crate) fn order_request(
    session: &Session,
    quote: &CheckoutQuote,
    method: PaymentMethod,
    payment_intent: Option<PaymentIntentId>,
    payment_status: Option<PaymentStatus>,
) -> OrderRequest {
    OrderRequest {
        user_id: session.user_id.clone(),
        items: quote
            .lines
            .iter()
            .map(|line| OrderItem {
                prop_id: line.prop_id.clone(),
                mode: line.mode,
            })
            .collect(),
        delivery_fee: quote.delivery_fee,
        total_price: quote.total,
        payment_method: method,
        payment_intent,
        payment_status,
    }
}

fn to_minor(amount: u64) -> Result<i64, PricingError> {
    i64::try_from(amount).map_err(|_| PricingError::AmountOverflow)
}

fn from_minor(amount: i64) -> Result<u64, PricingError> {
    u64::try_from(amount).map_err(|_| PricingError::AmountOverflow)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::always;
    use testresult::TestResult;

    use propbox::pricing::DELIVERY_FEE_MINOR;

    use crate::test::{TestServices, cart_line, discounted_prop, test_session};

    use super::*;

    #[test]
    fn quote_totals_include_the_delivery_fee() -> TestResult {
        let lines = vec![
            cart_line("line-1", "prop-1", LineMode::Purchase { quantity: 3 }, 1200_00),
            cart_line("line-2", "prop-2", LineMode::Rental { days: 14 }, 1400_00),
        ];

        let quote = quote_from_cart_lines(lines)?;

        assert_eq!(quote.source, OrderSource::Cart);
        assert_eq!(quote.subtotal, 2600_00);
        assert_eq!(quote.delivery_fee, DELIVERY_FEE_MINOR);
        assert_eq!(quote.total, 2700_00);

        Ok(())
    }

    #[test]
    fn empty_cart_quotes_no_delivery_fee() -> TestResult {
        let quote = quote_from_cart_lines(Vec::new())?;

        assert!(quote.is_empty());
        assert_eq!(quote.delivery_fee, 0);
        assert_eq!(quote.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn cod_checkout_places_order_and_clears_cart() -> TestResult {
        let session = test_session();
        let mut services = TestServices::new();

        services
            .orders
            .expect_create_order()
            .withf(|_, order| {
                order.payment_method == PaymentMethod::Cod
                    && order.payment_intent.is_none()
                    && order.payment_status.is_none()
            })
            .once()
            .returning(|_, _| {
                Ok(PlacedOrder {
                    id: "order-1".into(),
                    payment_status: None,
                })
            });

        services
            .carts
            .expect_clear_cart()
            .once()
            .returning(|_| Ok(()));

        let ctx = services.into_context();
        let quote = quote_from_cart_lines(vec![cart_line(
            "line-1",
            "prop-1",
            LineMode::Purchase { quantity: 1 },
            500_00,
        )])?;

        let outcome = checkout(&ctx, &session, &quote, PaymentMethod::Cod).await?;

        assert!(matches!(outcome, CheckoutOutcome::Placed(order) if order.id == "order-1".into()));

        Ok(())
    }

    #[tokio::test]
    async fn failed_cod_checkout_leaves_the_cart_alone() -> TestResult {
        let session = test_session();
        let mut services = TestServices::new();

        services
            .orders
            .expect_create_order()
            .once()
            .returning(|_, _| {
                Err(OrdersServiceError::UnexpectedResponse(
                    "boom".to_string(),
                ))
            });

        services.carts.expect_clear_cart().never();

        let ctx = services.into_context();
        let quote = quote_from_cart_lines(vec![cart_line(
            "line-1",
            "prop-1",
            LineMode::Purchase { quantity: 1 },
            500_00,
        )])?;

        let result = checkout(&ctx, &session, &quote, PaymentMethod::Cod).await;

        assert!(matches!(result, Err(CheckoutError::Orders(_))));

        Ok(())
    }

    #[tokio::test]
    async fn online_checkout_redirects_without_creating_an_order() -> TestResult {
        let session = test_session();
        let mut services = TestServices::new();

        services
            .payments
            .expect_create_checkout_session()
            .with(always(), always())
            .once()
            .returning(|_, _| Ok("cs_123".into()));

        services.orders.expect_create_order().never();
        services.carts.expect_clear_cart().never();

        let ctx = services.into_context();
        let quote = quote_from_cart_lines(vec![cart_line(
            "line-1",
            "prop-1",
            LineMode::Rental { days: 14 },
            1400_00,
        )])?;

        let outcome = checkout(&ctx, &session, &quote, PaymentMethod::Online).await?;

        assert!(
            matches!(outcome, CheckoutOutcome::PaymentRedirect(id) if id == "cs_123".into())
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_quote_short_circuits_before_any_request() -> TestResult {
        let session = test_session();
        let mut services = TestServices::new();

        services.orders.expect_create_order().never();
        services.payments.expect_create_checkout_session().never();
        services.carts.expect_clear_cart().never();

        let ctx = services.into_context();
        let quote = quote_from_cart_lines(Vec::new())?;

        let result = checkout(&ctx, &session, &quote, PaymentMethod::Cod).await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));

        Ok(())
    }

    #[tokio::test]
    async fn buy_now_quote_prices_the_discounted_prop() -> TestResult {
        let session = test_session();
        let mut services = TestServices::new();

        services
            .catalog
            .expect_get_prop()
            .once()
            .returning(|_, _| Ok(discounted_prop("prop-1", 500_00, 100_00, 0.2)));

        let ctx = services.into_context();

        let quote = buy_now_quote(
            &ctx,
            &session,
            &"prop-1".into(),
            LineMode::Purchase { quantity: 3 },
        )
        .await?;

        assert_eq!(quote.source, OrderSource::Direct);
        // 500 with 20% off is 400; three units plus the delivery fee.
        assert_eq!(quote.subtotal, 1200_00);
        assert_eq!(quote.total, 1200_00 + DELIVERY_FEE_MINOR);

        Ok(())
    }
}
