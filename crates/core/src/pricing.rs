//! Pricing

use jiff::Timestamp;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    discounts::{DiscountError, DiscountWindow, effective_unit_price},
    lines::{DAYS_PER_WEEK, LineMode},
};

/// Flat delivery fee in minor units, charged on any non-empty order.
pub const DELIVERY_FEE_MINOR: u64 = 100_00;

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A total does not fit in the minor-unit range.
    #[error("amount overflowed the minor-unit range")]
    AmountOverflow,

    /// Wrapped discount application error.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Calculates the total price of an order line.
///
/// Purchases cost the effective unit purchase price times the quantity.
/// Rentals cost the effective weekly rental price times `days / 7`; weeks are
/// never rounded, only the final amount is rounded to minor units.
///
/// # Errors
///
/// - [`PricingError::AmountOverflow`]: The total exceeds the minor-unit range.
/// - [`PricingError::Discount`]: The discount percentage could not be applied.
pub fn line_total<'a>(
    purchase_price: &Money<'a, Currency>,
    rental_price: &Money<'a, Currency>,
    mode: &LineMode,
    discount: Option<&DiscountWindow>,
    now: Timestamp,
) -> Result<Money<'a, Currency>, PricingError> {
    match mode {
        LineMode::Purchase { quantity } => {
            let unit = effective_unit_price(purchase_price, discount, now)?;

            let total = unit
                .to_minor_units()
                .checked_mul(i64::from(*quantity))
                .ok_or(PricingError::AmountOverflow)?;

            Ok(Money::from_minor(total, purchase_price.currency()))
        }
        LineMode::Rental { days } => {
            let unit = effective_unit_price(rental_price, discount, now)?;
            let total = weekly_rate_for_days(unit.to_minor_units(), *days)?;

            Ok(Money::from_minor(total, rental_price.currency()))
        }
    }
}

/// Pro-rates a weekly rate in minor units over a number of days.
fn weekly_rate_for_days(weekly_minor: i64, days: u32) -> Result<i64, PricingError> {
    let Some(weekly) = Decimal::from_i64(weekly_minor) else {
        unreachable!("always returns `Some` for every `i64`")
    };

    let total = weekly
        .checked_mul(Decimal::from(days))
        .and_then(|scaled| scaled.checked_div(Decimal::from(DAYS_PER_WEEK)))
        .ok_or(PricingError::AmountOverflow)?;

    total
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::AmountOverflow)
}

/// Delivery fee in minor units for an order with the given number of lines.
pub fn delivery_fee(line_count: usize) -> u64 {
    if line_count == 0 {
        0
    } else {
        DELIVERY_FEE_MINOR
    }
}

/// Sums line totals in minor units.
///
/// # Errors
///
/// Returns [`PricingError::AmountOverflow`] when the sum exceeds `u64`.
pub fn subtotal(line_totals: impl IntoIterator<Item = u64>) -> Result<u64, PricingError> {
    line_totals
        .into_iter()
        .try_fold(0_u64, u64::checked_add)
        .ok_or(PricingError::AmountOverflow)
}

/// Order total: subtotal plus delivery fee, in minor units.
///
/// # Errors
///
/// Returns [`PricingError::AmountOverflow`] when the total exceeds `u64`.
pub fn order_total(subtotal: u64, delivery_fee: u64) -> Result<u64, PricingError> {
    subtotal
        .checked_add(delivery_fee)
        .ok_or(PricingError::AmountOverflow)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::PKR;
    use testresult::TestResult;

    use super::*;

    fn prices<'a>() -> (Money<'a, Currency>, Money<'a, Currency>) {
        (
            Money::from_minor(500_00, PKR),
            Money::from_minor(700_00, PKR),
        )
    }

    #[test]
    fn purchase_total_multiplies_by_quantity() -> TestResult {
        let (purchase, rental) = prices();
        let mode = LineMode::Purchase { quantity: 3 };

        let total = line_total(&purchase, &rental, &mode, None, Timestamp::now())?;

        assert_eq!(total, Money::from_minor(1500_00, PKR));

        Ok(())
    }

    #[test]
    fn rental_total_scales_by_weeks() -> TestResult {
        let (purchase, rental) = prices();
        let mode = LineMode::Rental { days: 14 };

        let total = line_total(&purchase, &rental, &mode, None, Timestamp::now())?;

        assert_eq!(total, Money::from_minor(1400_00, PKR));

        Ok(())
    }

    #[test]
    fn rental_total_allows_fractional_weeks() -> TestResult {
        let (purchase, rental) = prices();
        let mode = LineMode::Rental { days: 10 };

        let total = line_total(&purchase, &rental, &mode, None, Timestamp::now())?;

        // 700 * 10/7 = 1000, not rounded to whole weeks.
        assert_eq!(total, Money::from_minor(1000_00, PKR));

        Ok(())
    }

    #[test]
    fn purchase_total_overflow_is_reported() {
        let purchase = Money::from_minor(i64::MAX, PKR);
        let rental = Money::from_minor(0, PKR);
        let mode = LineMode::Purchase { quantity: 2 };

        let result = line_total(&purchase, &rental, &mode, None, Timestamp::now());

        assert!(matches!(result, Err(PricingError::AmountOverflow)));
    }

    #[test]
    fn delivery_fee_is_waived_for_empty_orders() {
        assert_eq!(delivery_fee(0), 0);
        assert_eq!(delivery_fee(1), DELIVERY_FEE_MINOR);
        assert_eq!(delivery_fee(5), DELIVERY_FEE_MINOR);
    }

    #[test]
    fn subtotal_sums_line_totals() -> TestResult {
        assert_eq!(subtotal([100_00, 250_00, 49_99])?, 399_99);

        Ok(())
    }

    #[test]
    fn subtotal_of_no_lines_is_zero() -> TestResult {
        assert_eq!(subtotal([])?, 0);

        Ok(())
    }

    #[test]
    fn subtotal_overflow_is_reported() {
        let result = subtotal([u64::MAX, 1]);

        assert!(matches!(result, Err(PricingError::AmountOverflow)));
    }

    #[test]
    fn order_total_adds_delivery_fee() -> TestResult {
        assert_eq!(order_total(1400_00, DELIVERY_FEE_MINOR)?, 1500_00);

        Ok(())
    }
}
