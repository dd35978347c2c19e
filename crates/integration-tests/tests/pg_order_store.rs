//! `PostgreSQL` order store tests.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - `SHOP_DATABASE_URL` (or `DATABASE_URL`) pointing at it
//!
//! Migrations are applied by the tests themselves.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use plant_shop_core::{OrderSubmission, Pricer};
use plant_shop_storefront::config::ShopConfig;
use plant_shop_storefront::db::{MIGRATOR, OrderStore, PgOrderStore, create_pool};

async fn store() -> PgOrderStore {
    let config = ShopConfig::from_env().expect("SHOP_DATABASE_URL must be set");
    let pool = create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    MIGRATOR.run(&pool).await.expect("Failed to run migrations");
    PgOrderStore::new(pool)
}

fn submission(email: &str) -> OrderSubmission {
    OrderSubmission {
        name: "Jane Gardener".to_string(),
        email: email.to_string(),
        phone: "519-555-0100".to_string(),
        address: "12 Fern St".to_string(),
        city: "Quebec City".to_string(),
        province: "QC".to_string(),
        postcode: "G1R 4P5".to_string(),
        pot_small: String::new(),
        pot_medium: "2".to_string(),
        pot_big: "1".to_string(),
        delivery_time: "1".to_string(),
    }
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_saved_order_reads_back_unchanged() {
    let store = store().await;
    let pricer = Pricer::default();
    let email = format!("pg-roundtrip-{}@example.com", std::process::id());
    let order = pricer.price(pricer.validate(&submission(&email)).unwrap());

    let id = store.save(&order).await.unwrap();

    let orders = store.list_all().await.unwrap();
    let stored = orders.iter().find(|o| o.id == id).expect("saved order listed");
    assert_eq!(stored.order, order);
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_orders_list_oldest_first() {
    let store = store().await;
    let pricer = Pricer::default();
    let first = pricer.price(pricer.validate(&submission("first@example.com")).unwrap());
    let second = pricer.price(pricer.validate(&submission("second@example.com")).unwrap());

    let first_id = store.save(&first).await.unwrap();
    let second_id = store.save(&second).await.unwrap();

    let ids: Vec<_> = store.list_all().await.unwrap().iter().map(|o| o.id).collect();
    let first_pos = ids.iter().position(|id| *id == first_id).unwrap();
    let second_pos = ids.iter().position(|id| *id == second_id).unwrap();
    assert!(first_pos < second_pos);
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_ping_succeeds() {
    store().await.ping().await.unwrap();
}
