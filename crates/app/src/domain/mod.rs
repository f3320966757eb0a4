//! Storefront service clients.

use propbox::lines::{LineMode, MIN_RENTAL_DAYS};

pub mod carts;
pub mod catalog;
pub mod orders;
pub mod payments;

/// Wire tag for a line mode.
pub(crate) fn line_mode_tag(mode: &LineMode) -> &'static str {
    match mode {
        LineMode::Purchase { .. } => "purchase",
        LineMode::Rental { .. } => "rental",
    }
}

/// Rebuild a line mode from its wire tag and counters. Unknown tags are
/// rejected; a rental with no recorded duration falls back to the minimum
/// rental period, matching what the storefront sends at add-to-cart time.
pub(crate) fn parse_line_mode(tag: &str, quantity: u32, rental_days: u32) -> Option<LineMode> {
    match tag {
        "purchase" => Some(LineMode::Purchase {
            quantity: quantity.max(1),
        }),
        "rental" => Some(LineMode::Rental {
            days: if rental_days == 0 {
                MIN_RENTAL_DAYS
            } else {
                rental_days
            },
        }),
        _ => None,
    }
}
