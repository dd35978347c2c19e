//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /              - Order form
//! POST /              - Submit order (form errors or receipt)
//! GET  /allorders     - Every stored order
//! GET  /health        - Liveness check
//! GET  /health/ready  - Readiness check (order store reachable)
//! GET  /static/*      - Stylesheet
//! ```

pub mod health;
pub mod order_form;
pub mod orders;
pub mod views;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the health check routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::health))
        .route("/ready", get(health::readiness))
}

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(order_form::show).post(order_form::submit))
        .route("/allorders", get(orders::index))
        .nest("/health", health_routes())
}
