//! Cart Models

use propbox::lines::{LineMode, MIN_RENTAL_DAYS};

use crate::{
    domain::{
        carts::{errors::CartsServiceError, records::CartLineRecord},
        catalog::models::PropId,
        parse_line_mode,
    },
    ids::OpaqueId,
};

/// Cart line id issued by the cart service.
pub type CartLineId = OpaqueId<CartLine>;

/// A server-priced line in a customer's cart.
///
/// The cart service is the source of truth for prices at add-to-cart time;
/// `total_price` is never recomputed locally.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub id: CartLineId,
    pub prop_id: PropId,
    pub prop_name: String,
    /// Unit purchase price in minor units.
    pub purchase_price: u64,
    /// Weekly rental price in minor units.
    pub rental_price: u64,
    pub mode: LineMode,
    /// Server-computed line total in minor units.
    pub total_price: u64,
}

/// Requested change to a cart line; the backend recomputes the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartLineUpdate {
    /// Set the purchase quantity.
    Quantity(u32),
    /// Set the rental duration in days.
    RentalDays(u32),
}

/// Quantity after a stepper click; never drops below one unit.
pub fn stepped_quantity(current: u32, delta: i32) -> u32 {
    let next = i64::from(current) + i64::from(delta);

    u32::try_from(next.max(1)).unwrap_or(u32::MAX)
}

/// Rental days after a stepper click; moves in whole weeks and never drops
/// below the minimum rental period.
pub fn stepped_rental_days(current: u32, delta_weeks: i32) -> u32 {
    let next = i64::from(current) + i64::from(delta_weeks) * 7;

    u32::try_from(next.max(i64::from(MIN_RENTAL_DAYS))).unwrap_or(u32::MAX)
}

impl TryFrom<CartLineRecord> for CartLine {
    type Error = CartsServiceError;

    fn try_from(record: CartLineRecord) -> Result<Self, Self::Error> {
        let mode = parse_line_mode(&record.mode, record.quantity, record.rental_days)
            .ok_or_else(|| CartsServiceError::InvalidLineMode(record.mode.clone()))?;

        Ok(Self {
            id: CartLineId::new(record.id),
            prop_id: PropId::new(record.prop_id.id),
            prop_name: record.prop_id.name,
            purchase_price: record.purchase_price,
            rental_price: record.rental_price,
            mode,
            total_price: record.total_price,
        })
    }
}
