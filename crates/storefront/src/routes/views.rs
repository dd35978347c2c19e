//! View models for the order pages.
//!
//! Templates only see preformatted strings; all money formatting happens
//! here.

use plant_shop_core::{
    PricedOrder, PricingConfig, ProvinceCode, Quantity, StoredOrder, UnitPrices, ValidationErrors,
};

/// Display name for a province or territory code.
#[must_use]
pub fn province_name(code: ProvinceCode) -> &'static str {
    match code.as_str() {
        "AB" => "Alberta",
        "BC" => "British Columbia",
        "MB" => "Manitoba",
        "NB" => "New Brunswick",
        "NL" => "Newfoundland and Labrador",
        "NS" => "Nova Scotia",
        "NT" => "Northwest Territories",
        "NU" => "Nunavut",
        "ON" => "Ontario",
        "PE" => "Prince Edward Island",
        "QC" => "Quebec",
        "SK" => "Saskatchewan",
        "YT" => "Yukon",
        _ => "Other",
    }
}

/// A `<select>` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Province options for the form, one per entry in the tax table.
#[must_use]
pub fn province_options(config: &PricingConfig, selected: &str) -> Vec<SelectOption> {
    config
        .tax_rates
        .provinces()
        .map(|(code, _)| SelectOption {
            value: code.to_string(),
            label: province_name(code).to_string(),
            selected: code.as_str() == selected,
        })
        .collect()
}

/// Delivery-time options for the form, one per shipping tier.
#[must_use]
pub fn delivery_options(config: &PricingConfig, selected: &str) -> Vec<SelectOption> {
    config
        .shipping
        .tiers()
        .map(|(tier, charge)| {
            let days = tier.code();
            let label = if days == 1 {
                format!("1 day ({charge})")
            } else {
                format!("{days} days ({charge})")
            };
            SelectOption {
                value: tier.to_string(),
                label,
                selected: tier.to_string() == selected,
            }
        })
        .collect()
}

/// A validation message for the error list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub field: &'static str,
    pub message: &'static str,
}

impl ErrorView {
    /// Flatten validation errors in form order.
    #[must_use]
    pub fn from_errors(errors: &ValidationErrors) -> Vec<Self> {
        errors
            .iter()
            .map(|e| Self {
                field: e.field.as_str(),
                message: e.message,
            })
            .collect()
    }
}

/// One purchased pot size on the receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    pub label: &'static str,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl ReceiptLine {
    fn lines(order: &PricedOrder, prices: &UnitPrices) -> Vec<Self> {
        [
            ("Small pot", order.pot_small, prices.small),
            ("Medium pot", order.pot_medium, prices.medium),
            ("Big pot", order.pot_big, prices.big),
        ]
        .into_iter()
        .filter(|(_, quantity, _)| !quantity.is_zero())
        .map(|(label, quantity, unit)| Self {
            label,
            quantity: quantity.get(),
            unit_price: unit.to_string(),
            line_total: (unit * quantity.get()).to_string(),
        })
        .collect()
    }
}

/// Receipt shown after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub delivery_address: String,
    pub lines: Vec<ReceiptLine>,
    pub shipping_charge: String,
    pub sub_total: String,
    pub tax_rate: String,
    pub tax_paid: String,
    pub total: String,
}

impl ReceiptView {
    #[must_use]
    pub fn new(order: &PricedOrder, prices: &UnitPrices) -> Self {
        Self {
            name: order.name.clone(),
            email: order.email.clone(),
            phone: order.phone.clone(),
            delivery_address: order.delivery_address.clone(),
            lines: ReceiptLine::lines(order, prices),
            shipping_charge: order.shipping_charge.to_string(),
            sub_total: order.sub_total.to_string(),
            tax_rate: order.tax_rate.to_string(),
            tax_paid: order.tax_paid.to_string(),
            total: order.total.to_string(),
        }
    }
}

/// One row of the all-orders table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRowView {
    pub id: i32,
    pub placed_at: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub delivery_address: String,
    pub pot_small: Quantity,
    pub pot_medium: Quantity,
    pub pot_big: Quantity,
    pub shipping_charge: String,
    pub sub_total: String,
    pub tax_rate: String,
    pub tax_paid: String,
    pub total: String,
}

impl From<&StoredOrder> for OrderRowView {
    fn from(stored: &StoredOrder) -> Self {
        let order = &stored.order;
        Self {
            id: stored.id.as_i32(),
            placed_at: stored.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            name: order.name.clone(),
            email: order.email.clone(),
            phone: order.phone.clone(),
            delivery_address: order.delivery_address.clone(),
            pot_small: order.pot_small,
            pot_medium: order.pot_medium,
            pot_big: order.pot_big,
            shipping_charge: order.shipping_charge.to_string(),
            sub_total: order.sub_total.to_string(),
            tax_rate: order.tax_rate.to_string(),
            tax_paid: order.tax_paid.to_string(),
            total: order.total.to_string(),
        }
    }
}
