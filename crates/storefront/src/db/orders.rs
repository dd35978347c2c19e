//! Order store contract and its `PostgreSQL` implementation.
//!
//! Queries use the runtime-checked `sqlx::query*` functions so the crate
//! builds without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use plant_shop_core::{
    DeliveryTier, Money, OrderId, PricedOrder, ProvinceCode, Quantity, StoredOrder, TaxRate,
};

use super::RepositoryError;

/// Where priced orders are kept.
///
/// Orders are only ever inserted; nothing in the shop updates or deletes
/// them.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a priced order and return its new ID.
    async fn save(&self, order: &PricedOrder) -> Result<OrderId, RepositoryError>;

    /// All stored orders, oldest first.
    async fn list_all(&self) -> Result<Vec<StoredOrder>, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Order store backed by the `orders` table.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    /// Create a store on top of a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape of the `orders` table.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    created_at: DateTime<Utc>,
    name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    province: String,
    postcode: String,
    delivery_address: String,
    pot_small: i64,
    pot_medium: i64,
    pot_big: i64,
    delivery_tier: i64,
    shipping_charge: Decimal,
    sub_total: Decimal,
    tax_rate: Decimal,
    tax_paid: Decimal,
    total: Decimal,
}

fn quantity(column: &str, value: i64) -> Result<Quantity, RepositoryError> {
    u32::try_from(value).map(Quantity::new).map_err(|_| {
        RepositoryError::DataCorruption(format!("invalid {column} in database: {value}"))
    })
}

impl TryFrom<OrderRow> for StoredOrder {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let province = ProvinceCode::parse(&row.province).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid province in database: {e}"))
        })?;
        let delivery_tier = u32::try_from(row.delivery_tier)
            .ok()
            .filter(|code| *code > 0)
            .map(DeliveryTier::new)
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "invalid delivery tier in database: {}",
                    row.delivery_tier
                ))
            })?;

        Ok(Self {
            id: OrderId::new(row.id),
            created_at: row.created_at,
            order: PricedOrder {
                name: row.name,
                email: row.email,
                phone: row.phone,
                address: row.address,
                city: row.city,
                province,
                postcode: row.postcode,
                delivery_address: row.delivery_address,
                pot_small: quantity("pot_small", row.pot_small)?,
                pot_medium: quantity("pot_medium", row.pot_medium)?,
                pot_big: quantity("pot_big", row.pot_big)?,
                delivery_tier,
                shipping_charge: Money::new(row.shipping_charge),
                sub_total: Money::new(row.sub_total),
                tax_rate: TaxRate::percent(row.tax_rate),
                tax_paid: Money::new(row.tax_paid),
                total: Money::new(row.total),
            },
        })
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn save(&self, order: &PricedOrder) -> Result<OrderId, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO orders (
                name, email, phone, address, city, province, postcode,
                delivery_address, pot_small, pot_medium, pot_big, delivery_tier,
                shipping_charge, sub_total, tax_rate, tax_paid, total
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING id
            ",
        )
        .bind(&order.name)
        .bind(&order.email)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(&order.city)
        .bind(order.province.as_str())
        .bind(&order.postcode)
        .bind(&order.delivery_address)
        .bind(i64::from(order.pot_small.get()))
        .bind(i64::from(order.pot_medium.get()))
        .bind(i64::from(order.pot_big.get()))
        .bind(i64::from(order.delivery_tier.code()))
        .bind(order.shipping_charge.amount())
        .bind(order.sub_total.amount())
        .bind(order.tax_rate.as_percent())
        .bind(order.tax_paid.amount())
        .bind(order.total.amount())
        .fetch_one(&self.pool)
        .await?;

        Ok(OrderId::new(id))
    }

    async fn list_all(&self) -> Result<Vec<StoredOrder>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r"
            SELECT id, created_at, name, email, phone, address, city, province, postcode,
                   delivery_address, pot_small, pot_medium, pot_big, delivery_tier,
                   shipping_charge, sub_total, tax_rate, tax_paid, total
            FROM orders
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StoredOrder::try_from).collect()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
