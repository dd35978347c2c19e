//! Integration tests for the Plant Shop.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (no services needed)
//! cargo test -p plant-shop-integration-tests
//!
//! # Including the PostgreSQL store tests
//! SHOP_DATABASE_URL=postgres://... cargo test -p plant-shop-integration-tests -- --ignored
//! ```
//!
//! The helpers here drive the real router with `tower::ServiceExt::oneshot`,
//! so no socket is bound.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;

use plant_shop_core::{OrderId, Pricer, PricedOrder, StoredOrder};
use plant_shop_storefront::db::{MemoryOrderStore, OrderStore, RepositoryError};
use plant_shop_storefront::state::AppState;

/// Build the storefront router over the given store with default pricing.
pub fn app_with_store(store: Arc<dyn OrderStore>) -> Router {
    plant_shop_storefront::app(AppState::new(Pricer::default(), store))
}

/// Build the storefront router over a fresh in-memory store.
pub fn memory_app() -> (Router, Arc<MemoryOrderStore>) {
    let store = Arc::new(MemoryOrderStore::new());
    (app_with_store(store.clone()), store)
}

/// A complete, valid Ontario order: one small pot, two-day delivery.
pub fn ontario_order() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Jane Gardener"),
        ("email", "jane@example.com"),
        ("phone", "519-555-0100"),
        ("address", "12 Fern St"),
        ("city", "Waterloo"),
        ("province", "ON"),
        ("postcode", "N2L 3G1"),
        ("potSmall", "1"),
        ("potMedium", "0"),
        ("potBig", "0"),
        ("deliveryTime", "2"),
    ]
}

/// Replace one field of a form, keeping the rest.
pub fn with_field(
    mut fields: Vec<(&'static str, &'static str)>,
    name: &str,
    value: &'static str,
) -> Vec<(&'static str, &'static str)> {
    for field in &mut fields {
        if field.0 == name {
            field.1 = value;
        }
    }
    fields
}

/// URL-encode form fields as `application/x-www-form-urlencoded`.
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Send a request and return its status and body text.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// GET a path.
pub async fn get(app: &Router, path: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(app, request).await
}

/// POST a form to a path.
pub async fn post_form(app: &Router, path: &str, fields: &[(&str, &str)]) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body(fields)))
        .unwrap();
    send(app, request).await
}

/// Wait until the background save has written `expected` orders.
///
/// Returns the final count, which may be short if the saves never land.
pub async fn wait_for_orders(store: &MemoryOrderStore, expected: usize) -> usize {
    for _ in 0..100 {
        let len = store.len().await;
        if len >= expected {
            return len;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    store.len().await
}

/// A store whose every operation fails.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl OrderStore for FailingStore {
    async fn save(&self, _order: &PricedOrder) -> Result<OrderId, RepositoryError> {
        Err(RepositoryError::DataCorruption("store offline".to_string()))
    }

    async fn list_all(&self) -> Result<Vec<StoredOrder>, RepositoryError> {
        Err(RepositoryError::DataCorruption("store offline".to_string()))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Err(RepositoryError::DataCorruption("store offline".to_string()))
    }
}
