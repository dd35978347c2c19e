//! The priced order record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DeliveryTier, Money, OrderId, ProvinceCode, Quantity, TaxRate};

/// A validated and priced order. Built once by [`crate::Pricer::price`],
/// shown as a receipt, and written to the store once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedOrder {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub province: ProvinceCode,
    pub postcode: String,
    /// `"{address}, {city}, {province}, {postcode}"`
    pub delivery_address: String,
    pub pot_small: Quantity,
    pub pot_medium: Quantity,
    pub pot_big: Quantity,
    pub delivery_tier: DeliveryTier,
    pub shipping_charge: Money,
    /// Pots plus shipping, before tax. Not rounded.
    pub sub_total: Money,
    pub tax_rate: TaxRate,
    /// Rounded to cents.
    pub tax_paid: Money,
    /// Rounded to cents.
    pub total: Money,
}

/// An order as it comes back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOrder {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub order: PricedOrder,
}
