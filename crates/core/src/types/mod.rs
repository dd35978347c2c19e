//! Core types for the Plant Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod delivery;
pub mod id;
pub mod money;
pub mod province;
pub mod quantity;

pub use delivery::{DeliveryTier, DeliveryTierError};
pub use id::*;
pub use money::{Money, TaxRate};
pub use province::{ProvinceCode, ProvinceCodeError};
pub use quantity::{Quantity, QuantityError};
