//! PropBox
//!
//! Core pricing domain for the PropBox prop rental and purchase storefront:
//! time-bounded discount windows, purchase and rental line totals, and order
//! totals. All amounts are money values in minor units; nothing here performs
//! I/O.

pub mod discounts;
pub mod lines;
pub mod pricing;
