//! Order pricing.
//!
//! The [`Pricer`] turns a [`ValidatedOrder`] into a [`PricedOrder`]. All
//! lookup tables live in a [`PricingConfig`] handed to the pricer when it
//! is built, so nothing here reads global state.
//!
//! ```text
//! subTotal = small*10 + medium*20 + big*30 + shipping(tier)
//! taxPaid  = round2(subTotal * rate(province) / 100)
//! total    = round2(subTotal + taxPaid)
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::order::PricedOrder;
use crate::types::{DeliveryTier, Money, ProvinceCode, TaxRate};
use crate::validation::{OrderSubmission, ValidatedOrder, ValidationErrors, validate};

/// Sales tax rate per province or territory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxTable {
    rates: BTreeMap<ProvinceCode, TaxRate>,
}

impl TaxTable {
    /// Build a table from `(code, percent)` pairs.
    #[must_use]
    pub fn new(rates: impl IntoIterator<Item = (ProvinceCode, TaxRate)>) -> Self {
        Self {
            rates: rates.into_iter().collect(),
        }
    }

    /// Combined sales tax rates for the Canadian provinces and territories.
    #[must_use]
    pub fn canadian() -> Self {
        let five = TaxRate::percent(Decimal::from(5));
        let twelve = TaxRate::percent(Decimal::from(12));
        let fifteen = TaxRate::percent(Decimal::from(15));

        let entries = [
            ("AB", five),
            ("NT", five),
            ("NU", five),
            ("YT", five),
            ("BC", twelve),
            ("MB", twelve),
            ("NB", fifteen),
            ("NL", fifteen),
            ("NS", fifteen),
            ("PE", fifteen),
            ("ON", TaxRate::percent(Decimal::from(13))),
            ("QC", TaxRate::percent(Decimal::new(14975, 3))),
            ("SK", TaxRate::percent(Decimal::from(11))),
        ];

        Self::new(entries.into_iter().filter_map(|(code, rate)| {
            ProvinceCode::parse(code).ok().map(|code| (code, rate))
        }))
    }

    /// Tax rate for a province, if the shop ships there.
    #[must_use]
    pub fn rate_for(&self, province: ProvinceCode) -> Option<TaxRate> {
        self.rates.get(&province).copied()
    }

    /// Provinces with a known rate, in code order.
    pub fn provinces(&self) -> impl Iterator<Item = (ProvinceCode, TaxRate)> + '_ {
        self.rates.iter().map(|(code, rate)| (*code, *rate))
    }

    /// Number of provinces in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Shipping surcharge per delivery tier. Tiers not in the table ship free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingTable {
    charges: BTreeMap<DeliveryTier, Money>,
}

impl ShippingTable {
    /// Build a table from `(tier, charge)` pairs.
    #[must_use]
    pub fn new(charges: impl IntoIterator<Item = (DeliveryTier, Money)>) -> Self {
        Self {
            charges: charges.into_iter().collect(),
        }
    }

    /// Charge for a tier; zero for unknown tiers.
    #[must_use]
    pub fn charge_for(&self, tier: DeliveryTier) -> Money {
        self.charges.get(&tier).copied().unwrap_or(Money::ZERO)
    }

    /// Tiers with a surcharge, fastest first.
    pub fn tiers(&self) -> impl Iterator<Item = (DeliveryTier, Money)> + '_ {
        self.charges.iter().map(|(tier, charge)| (*tier, *charge))
    }
}

impl Default for ShippingTable {
    fn default() -> Self {
        Self::new([
            (DeliveryTier::new(1), Money::dollars(30)),
            (DeliveryTier::new(2), Money::dollars(25)),
            (DeliveryTier::new(3), Money::dollars(20)),
            (DeliveryTier::new(4), Money::dollars(15)),
        ])
    }
}

/// Price of a single pot of each size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPrices {
    pub small: Money,
    pub medium: Money,
    pub big: Money,
}

impl Default for UnitPrices {
    fn default() -> Self {
        Self {
            small: Money::dollars(10),
            medium: Money::dollars(20),
            big: Money::dollars(30),
        }
    }
}

/// Everything the pricer needs to know about the shop's prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    pub tax_rates: TaxTable,
    pub shipping: ShippingTable,
    pub unit_prices: UnitPrices,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rates: TaxTable::canadian(),
            shipping: ShippingTable::default(),
            unit_prices: UnitPrices::default(),
        }
    }
}

/// Validates submissions and prices them against one [`PricingConfig`].
#[derive(Debug, Clone, Default)]
pub struct Pricer {
    config: PricingConfig,
}

impl Pricer {
    /// Create a pricer for the given tables.
    #[must_use]
    pub const fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// The tables this pricer uses.
    #[must_use]
    pub const fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Validate a submission against this pricer's tax table.
    ///
    /// # Errors
    ///
    /// Returns every failing field; see [`validate`].
    pub fn validate(&self, submission: &OrderSubmission) -> Result<ValidatedOrder, ValidationErrors> {
        validate(submission, &self.config.tax_rates)
    }

    /// Compute the priced order. Never fails and never has side effects.
    #[must_use]
    pub fn price(&self, order: ValidatedOrder) -> PricedOrder {
        let prices = &self.config.unit_prices;
        let shipping_charge = self.config.shipping.charge_for(order.delivery_tier);

        let sub_total = prices.small * order.pot_small.get()
            + prices.medium * order.pot_medium.get()
            + prices.big * order.pot_big.get()
            + shipping_charge;
        let tax_paid = order.tax_rate.tax_on(sub_total);
        let total = (sub_total + tax_paid).round_cents();

        let delivery_address = format!(
            "{}, {}, {}, {}",
            order.address, order.city, order.province, order.postcode
        );

        PricedOrder {
            name: order.name,
            email: order.email,
            phone: order.phone,
            address: order.address,
            city: order.city,
            province: order.province,
            postcode: order.postcode,
            delivery_address,
            pot_small: order.pot_small,
            pot_medium: order.pot_medium,
            pot_big: order.pot_big,
            delivery_tier: order.delivery_tier,
            shipping_charge,
            sub_total,
            tax_rate: order.tax_rate,
            tax_paid,
            total,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn submission(province: &str, tier: &str, pots: [&str; 3]) -> OrderSubmission {
        OrderSubmission {
            name: "Jane Gardener".to_string(),
            email: "jane@example.com".to_string(),
            phone: "519-555-0100".to_string(),
            address: "12 Fern St".to_string(),
            city: "Waterloo".to_string(),
            province: province.to_string(),
            postcode: "N2L 3G1".to_string(),
            pot_small: pots[0].to_string(),
            pot_medium: pots[1].to_string(),
            pot_big: pots[2].to_string(),
            delivery_time: tier.to_string(),
        }
    }

    fn price(province: &str, tier: &str, pots: [&str; 3]) -> PricedOrder {
        let pricer = Pricer::default();
        let validated = pricer.validate(&submission(province, tier, pots)).unwrap();
        pricer.price(validated)
    }

    fn dollars(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2))
    }

    #[test]
    fn test_ontario_one_small_pot() {
        let order = price("ON", "2", ["1", "0", "0"]);
        assert_eq!(order.shipping_charge, Money::dollars(25));
        assert_eq!(order.sub_total, Money::dollars(35));
        assert_eq!(order.tax_rate.as_percent(), Decimal::from(13));
        assert_eq!(order.tax_paid, dollars(455));
        assert_eq!(order.total, dollars(3955));
    }

    #[test]
    fn test_quebec_rounds_tax_half_up() {
        let order = price("QC", "1", ["0", "2", "1"]);
        assert_eq!(order.sub_total, Money::dollars(100));
        assert_eq!(order.tax_rate.as_percent(), Decimal::new(14975, 3));
        assert_eq!(order.tax_paid, dollars(1498));
        assert_eq!(order.total, dollars(11498));
    }

    #[test]
    fn test_blank_quantities_price_as_zero() {
        let order = price("AB", "4", ["", "", "3"]);
        assert_eq!(order.pot_small.get(), 0);
        assert_eq!(order.pot_medium.get(), 0);
        assert_eq!(order.sub_total, Money::dollars(90 + 15));
    }

    #[test]
    fn test_unknown_tier_ships_free() {
        let order = price("SK", "9", ["2", "0", "0"]);
        assert_eq!(order.shipping_charge, Money::ZERO);
        assert_eq!(order.sub_total, Money::dollars(20));
        assert_eq!(order.tax_paid, dollars(220));
        assert_eq!(order.total, dollars(2220));
    }

    #[test]
    fn test_delivery_address_joins_parts() {
        let order = price("ON", "3", ["1", "1", "1"]);
        assert_eq!(order.delivery_address, "12 Fern St, Waterloo, ON, N2L 3G1");
    }

    #[test]
    fn test_every_known_province_matches_table() {
        let expected = [
            ("AB", Decimal::from(5)),
            ("NT", Decimal::from(5)),
            ("NU", Decimal::from(5)),
            ("YT", Decimal::from(5)),
            ("BC", Decimal::from(12)),
            ("MB", Decimal::from(12)),
            ("NB", Decimal::from(15)),
            ("NL", Decimal::from(15)),
            ("NS", Decimal::from(15)),
            ("PE", Decimal::from(15)),
            ("ON", Decimal::from(13)),
            ("QC", Decimal::new(14975, 3)),
            ("SK", Decimal::from(11)),
        ];
        let table = TaxTable::canadian();
        assert_eq!(table.len(), expected.len());
        for (code, percent) in expected {
            let rate = table.rate_for(ProvinceCode::parse(code).unwrap()).unwrap();
            assert_eq!(rate.as_percent(), percent, "province {code}");
            assert_eq!(price(code, "1", ["1", "0", "0"]).tax_rate.as_percent(), percent);
        }
    }

    #[test]
    fn test_pricing_is_deterministic() {
        let pricer = Pricer::default();
        let input = submission("NS", "3", ["4", "5", "6"]);
        let first = pricer.price(pricer.validate(&input).unwrap());
        let second = pricer.price(pricer.validate(&input).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_tables_are_honoured() {
        let config = PricingConfig {
            tax_rates: TaxTable::new([(
                ProvinceCode::parse("ON").unwrap(),
                TaxRate::percent(Decimal::from(10)),
            )]),
            shipping: ShippingTable::new([(DeliveryTier::new(1), Money::dollars(5))]),
            unit_prices: UnitPrices {
                small: Money::dollars(1),
                medium: Money::dollars(2),
                big: Money::dollars(3),
            },
        };
        let pricer = Pricer::new(config);
        let order = pricer.price(pricer.validate(&submission("ON", "1", ["1", "1", "1"])).unwrap());
        assert_eq!(order.sub_total, Money::dollars(11));
        assert_eq!(order.tax_paid, dollars(110));
        assert!(pricer.validate(&submission("QC", "1", ["1", "0", "0"])).is_err());
    }
}
