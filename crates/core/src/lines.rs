//! Line Modes

/// Days in a rental week.
pub const DAYS_PER_WEEK: u32 = 7;

/// Minimum rental period, in days.
pub const MIN_RENTAL_DAYS: u32 = 7;

/// How a catalog item sits in an order line: bought outright or rented for a
/// number of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Purchase at the unit purchase price.
    Purchase {
        /// Number of units bought.
        quantity: u32,
    },

    /// Rent at the weekly rental price.
    Rental {
        /// Rental duration in days. Fractional weeks are allowed.
        days: u32,
    },
}

impl LineMode {
    /// Units ordered; a rental always covers a single unit.
    pub fn quantity(&self) -> u32 {
        match self {
            Self::Purchase { quantity } => *quantity,
            Self::Rental { .. } => 1,
        }
    }

    /// Rental duration in days; zero for purchases.
    pub fn rental_days(&self) -> u32 {
        match self {
            Self::Purchase { .. } => 0,
            Self::Rental { days } => *days,
        }
    }
}
