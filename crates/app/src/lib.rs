//! PropBox storefront client: typed clients for the catalog, cart, order and
//! payment services, checkout orchestration, and payment-return
//! reconciliation.

pub mod checkout;
pub mod config;
pub mod context;
pub mod domain;
pub mod ids;
pub mod session;
