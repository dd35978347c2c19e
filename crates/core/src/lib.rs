//! Plant Shop Core - order validation and pricing.
//!
//! This crate holds everything the order form needs that does not touch
//! the network or the database. It is shared by:
//! - `storefront` - The web binary rendering the form and receipts
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. A submitted form flows through it in two
//! steps:
//!
//! ```text
//! OrderSubmission --validate()--> ValidatedOrder --Pricer::price()--> PricedOrder
//!                      \
//!                       `--> ValidationErrors (every failing field at once)
//! ```
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, money, quantities, provinces, delivery tiers
//! - [`validation`] - Field-level rules for a raw form submission
//! - [`pricing`] - Tax and shipping tables and the order pricer
//! - [`order`] - The priced order record that gets persisted

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

pub use order::{PricedOrder, StoredOrder};
pub use pricing::{Pricer, PricingConfig, ShippingTable, TaxTable, UnitPrices};
pub use types::*;
pub use validation::{
    FieldError, OrderField, OrderSubmission, ValidatedOrder, ValidationErrors, validate,
};
