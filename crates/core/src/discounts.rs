//! Discount Windows

use std::fmt;

use jiff::Timestamp;
use percentage::{Percentage, PercentageDecimal};
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors raised when constructing a discount window.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountWindowError {
    /// The window ends before it starts.
    #[error("discount window ends before it starts")]
    EndsBeforeStarts,
}

/// Errors specific to discounted price calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely represented in minor units.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// A percentage discount that only applies between two instants, inclusive
/// at both bounds.
///
/// Windows that end before they start are rejected at construction; read
/// paths never have to decide what a malformed window means.
pub struct DiscountWindow {
    percent: PercentageDecimal,
    starts_at: Timestamp,
    ends_at: Timestamp,
}

impl DiscountWindow {
    /// Creates a discount window covering `[starts_at, ends_at]`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountWindowError::EndsBeforeStarts`] when `ends_at`
    /// precedes `starts_at`.
    pub fn new(
        percent: PercentageDecimal,
        starts_at: Timestamp,
        ends_at: Timestamp,
    ) -> Result<Self, DiscountWindowError> {
        if ends_at < starts_at {
            return Err(DiscountWindowError::EndsBeforeStarts);
        }

        Ok(Self {
            percent,
            starts_at,
            ends_at,
        })
    }

    /// The discount as a decimal fraction of the unit price.
    pub fn percent(&self) -> &PercentageDecimal {
        &self.percent
    }

    /// When the discount begins to apply.
    pub fn starts_at(&self) -> Timestamp {
        self.starts_at
    }

    /// When the discount stops applying.
    pub fn ends_at(&self) -> Timestamp {
        self.ends_at
    }

    /// Whether the window covers the given instant. Both bounds are
    /// inclusive.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        self.starts_at <= now && now <= self.ends_at
    }
}

impl fmt::Debug for DiscountWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountWindow")
            .field("percent", &self.percent.value())
            .field("starts_at", &self.starts_at)
            .field("ends_at", &self.ends_at)
            .finish()
    }
}

impl Clone for DiscountWindow {
    fn clone(&self) -> Self {
        Self {
            percent: Percentage::from_decimal(self.percent.value()),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
        }
    }
}

/// Calculates the unit price in effect at `now`.
///
/// An active window discounts the base price by its percentage, rounded to
/// minor units away from zero at the midpoint. An inactive or absent window
/// leaves the base price untouched.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] when the percentage cannot be
/// safely applied to the price's minor units.
pub fn effective_unit_price<'a>(
    price: &Money<'a, Currency>,
    window: Option<&DiscountWindow>,
    now: Timestamp,
) -> Result<Money<'a, Currency>, DiscountError> {
    let Some(window) = window.filter(|window| window.is_active_at(now)) else {
        return Ok(*price);
    };

    let minor = price.to_minor_units();
    let discount = percent_of_minor(window.percent(), minor)?;
    let Some(discounted) = minor.checked_sub(discount) else {
        return Err(DiscountError::PercentConversion);
    };

    Ok(Money::from_minor(discounted, price.currency()))
}

/// Calculate a percentage of an amount of minor units.
fn percent_of_minor(percent: &PercentageDecimal, minor: i64) -> Result<i64, DiscountError> {
    let Some(percent) = Decimal::from_f64_retain(percent.value()) else {
        return Err(DiscountError::PercentConversion);
    };

    let Some(minor) = Decimal::from_i64(minor) else {
        unreachable!("always returns `Some` for every `i64`")
    };

    let Some(applied) = percent.checked_mul(minor) else {
        return Err(DiscountError::PercentConversion);
    };

    let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let Some(rounded) = rounded.to_i64() else {
        return Err(DiscountError::PercentConversion);
    };

    Ok(rounded)
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use rusty_money::iso::PKR;
    use testresult::TestResult;

    use super::*;

    fn window_around(now: Timestamp, percent: f64) -> TestResult<DiscountWindow> {
        Ok(DiscountWindow::new(
            Percentage::from_decimal(percent),
            now.checked_sub(1.hour())?,
            now.checked_add(1.hour())?,
        )?)
    }

    #[test]
    fn rejects_window_ending_before_it_starts() -> TestResult {
        let now = Timestamp::now();

        let result = DiscountWindow::new(
            Percentage::from_decimal(0.2),
            now,
            now.checked_sub(1.second())?,
        );

        assert!(matches!(result, Err(DiscountWindowError::EndsBeforeStarts)));

        Ok(())
    }

    #[test]
    fn window_bounds_are_inclusive() -> TestResult {
        let starts_at = Timestamp::now();
        let ends_at = starts_at.checked_add(1.hour())?;
        let window = DiscountWindow::new(Percentage::from_decimal(0.2), starts_at, ends_at)?;

        assert!(window.is_active_at(starts_at));
        assert!(window.is_active_at(ends_at));
        assert!(!window.is_active_at(starts_at.checked_sub(1.second())?));
        assert!(!window.is_active_at(ends_at.checked_add(1.second())?));

        Ok(())
    }

    #[test]
    fn active_window_discounts_unit_price() -> TestResult {
        let now = Timestamp::now();
        let window = window_around(now, 0.2)?;
        let price = Money::from_minor(500_00, PKR);

        let effective = effective_unit_price(&price, Some(&window), now)?;

        assert_eq!(effective, Money::from_minor(400_00, PKR));

        Ok(())
    }

    #[test]
    fn inactive_window_leaves_base_price() -> TestResult {
        let now = Timestamp::now();
        let window = DiscountWindow::new(
            Percentage::from_decimal(0.2),
            now.checked_add(1.hour())?,
            now.checked_add(2.hours())?,
        )?;
        let price = Money::from_minor(500_00, PKR);

        let effective = effective_unit_price(&price, Some(&window), now)?;

        assert_eq!(effective, price);

        Ok(())
    }

    #[test]
    fn expired_window_leaves_base_price() -> TestResult {
        let now = Timestamp::now();
        let window = DiscountWindow::new(
            Percentage::from_decimal(0.2),
            now.checked_sub(2.hours())?,
            now.checked_sub(1.hour())?,
        )?;
        let price = Money::from_minor(500_00, PKR);

        let effective = effective_unit_price(&price, Some(&window), now)?;

        assert_eq!(effective, price);

        Ok(())
    }

    #[test]
    fn missing_window_leaves_base_price() -> TestResult {
        let price = Money::from_minor(700_00, PKR);

        let effective = effective_unit_price(&price, None, Timestamp::now())?;

        assert_eq!(effective, price);

        Ok(())
    }

    #[test]
    fn discount_rounds_midpoint_away_from_zero() -> TestResult {
        let now = Timestamp::now();
        // 15% of 10 minor units is 1.5; rounds to 2.
        let window = window_around(now, 0.15)?;
        let price = Money::from_minor(10, PKR);

        let effective = effective_unit_price(&price, Some(&window), now)?;

        assert_eq!(effective, Money::from_minor(8, PKR));

        Ok(())
    }

    #[test]
    fn percent_of_minor_nan_returns_error() {
        let percent = Percentage::from_decimal(f64::NAN);
        let result = percent_of_minor(&percent, 100);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }
}
