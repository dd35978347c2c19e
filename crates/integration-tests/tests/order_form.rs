//! End-to-end tests for the order form, receipt, and order listing.
//!
//! Each test builds the real router over an in-memory store and drives it
//! in-process.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};

use plant_shop_integration_tests::{
    FailingStore, app_with_store, get, memory_app, ontario_order, post_form, send,
    wait_for_orders, with_field,
};

// ============================================================================
// GET /
// ============================================================================

#[tokio::test]
async fn test_order_form_renders_empty() {
    let (app, _store) = memory_app();

    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<form method="post" action="/""#));
    assert!(body.contains(r#"name="potSmall""#));
    assert!(body.contains(r#"name="deliveryTime""#));
    assert!(body.contains("Prince Edward Island"));
    assert!(body.contains("1 day ($30.00)"));
    assert!(!body.contains("Please fix the following"));
    assert!(!body.contains("Thank you for your order"));
}

#[tokio::test]
async fn test_responses_carry_security_headers_and_request_id() {
    let (app, _store) = memory_app();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.get("content-security-policy").is_some());
    assert!(headers.get("x-request-id").is_some());
}

// ============================================================================
// POST / - valid orders
// ============================================================================

#[tokio::test]
async fn test_valid_order_shows_receipt_and_is_stored() {
    let (app, store) = memory_app();

    let (status, body) = post_form(&app, "/", &ontario_order()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Thank you for your order"));
    assert!(body.contains("Jane Gardener"));
    assert!(body.contains("12 Fern St, Waterloo, ON, N2L 3G1"));
    assert!(body.contains("$25.00"), "shipping charge");
    assert!(body.contains("$35.00"), "sub total");
    assert!(body.contains("Tax (13%)"));
    assert!(body.contains("$4.55"));
    assert!(body.contains("$39.55"));

    assert_eq!(wait_for_orders(&store, 1).await, 1);
}

#[tokio::test]
async fn test_quebec_order_rounds_tax() {
    let (app, store) = memory_app();
    let fields = ontario_order();
    let fields = with_field(fields, "province", "QC");
    let fields = with_field(fields, "postcode", "H2X 1Y4");
    let fields = with_field(fields, "potSmall", "0");
    let fields = with_field(fields, "potMedium", "2");
    let fields = with_field(fields, "potBig", "1");
    let fields = with_field(fields, "deliveryTime", "1");

    let (status, body) = post_form(&app, "/", &fields).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("$100.00"), "sub total");
    assert!(body.contains("Tax (14.975%)"));
    assert!(body.contains("$14.98"));
    assert!(body.contains("$114.98"));
    assert!(body.contains("Medium pot"));
    assert!(!body.contains("Small pot"));

    assert_eq!(wait_for_orders(&store, 1).await, 1);
}

#[tokio::test]
async fn test_repeated_fields_keep_first_value() {
    let (app, store) = memory_app();
    let mut fields = ontario_order();
    fields.push(("name", "Someone Else"));
    fields.push(("potSmall", "lots"));

    let (status, body) = post_form(&app, "/", &fields).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Thank you for your order"));
    assert!(body.contains("Jane Gardener"));
    assert!(!body.contains("Someone Else"));
    assert!(body.contains("$39.55"));

    assert_eq!(wait_for_orders(&store, 1).await, 1);
}

#[tokio::test]
async fn test_unknown_fields_are_ignored() {
    let (app, _store) = memory_app();
    let mut fields = ontario_order();
    fields.push(("coupon", "FREEPOTS"));

    let (status, body) = post_form(&app, "/", &fields).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("$39.55"));
}

#[tokio::test]
async fn test_receipt_is_shown_when_store_fails() {
    let app = app_with_store(Arc::new(FailingStore));

    let (status, body) = post_form(&app, "/", &ontario_order()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Thank you for your order"));
    assert!(body.contains("$39.55"));
}

// ============================================================================
// POST / - invalid orders
// ============================================================================

#[tokio::test]
async fn test_empty_form_lists_every_required_field() {
    let (app, store) = memory_app();

    let (status, body) = post_form(&app, "/", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please fix the following"));
    for message in [
        "Name is required",
        "Email is required",
        "Phone must be formatted as xxx-xxx-xxxx",
        "Address is required",
        "City is required",
        "Postal Code must be formatted as A2A 2A2",
        "Province is required",
        "At least one pot must be purchased",
        "Delivery Time must be a number",
    ] {
        assert!(body.contains(message), "missing error: {message}");
    }
    assert!(!body.contains("Thank you for your order"));

    tokio::task::yield_now().await;
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_invalid_order_echoes_submitted_values() {
    let (app, store) = memory_app();
    let fields = with_field(ontario_order(), "phone", "5195550100x");
    let fields = with_field(fields, "potBig", "-2");

    let (status, body) = post_form(&app, "/", &fields).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Phone must be formatted as xxx-xxx-xxxx"));
    assert!(body.contains("Pots purchased can be positive integers only"));
    assert!(!body.contains("Name is required"));
    assert!(body.contains(r#"value="Jane Gardener""#));
    assert!(body.contains(r#"value="5195550100x""#));
    assert!(body.contains(r#"<option value="ON" selected>"#));
    assert!(body.contains(r#"<option value="2" selected>"#));

    tokio::task::yield_now().await;
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_unknown_province_is_rejected() {
    let (app, store) = memory_app();
    let fields = with_field(ontario_order(), "province", "ZZ");

    let (_, body) = post_form(&app, "/", &fields).await;

    assert!(body.contains("Province must be a Canadian province or territory"));

    tokio::task::yield_now().await;
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_submitted_markup_is_escaped() {
    let (app, _store) = memory_app();
    let fields = with_field(ontario_order(), "name", "<b>Jane</b>");
    let fields = with_field(fields, "potSmall", "x");

    let (_, body) = post_form(&app, "/", &fields).await;

    assert!(!body.contains("<b>Jane</b>"));
    assert!(body.contains("&#60;b&#62;Jane") || body.contains("&lt;b&gt;Jane"));
}

#[tokio::test]
async fn test_wrong_content_type_is_bad_request() {
    let (app, _store) = memory_app();
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Jane"}"#))
        .unwrap();

    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// GET /allorders
// ============================================================================

#[tokio::test]
async fn test_all_orders_starts_empty() {
    let (app, _store) = memory_app();

    let (status, body) = get(&app, "/allorders").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No orders yet."));
}

#[tokio::test]
async fn test_all_orders_lists_placed_orders() {
    let (app, store) = memory_app();
    post_form(&app, "/", &ontario_order()).await;
    let second = with_field(ontario_order(), "name", "Sam Sprout");
    post_form(&app, "/", &second).await;
    assert_eq!(wait_for_orders(&store, 2).await, 2);

    let (status, body) = get(&app, "/allorders").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Jane Gardener"));
    assert!(body.contains("Sam Sprout"));
    assert!(body.contains("$39.55"));
    assert!(!body.contains("No orders yet."));
}

#[tokio::test]
async fn test_all_orders_renders_empty_when_store_fails() {
    let app = app_with_store(Arc::new(FailingStore));

    let (status, body) = get(&app, "/allorders").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No orders yet."));
}

// ============================================================================
// Health and fallback
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _store) = memory_app();

    assert_eq!(get(&app, "/health").await, (StatusCode::OK, "ok".to_string()));
    assert_eq!(get(&app, "/health/ready").await, (StatusCode::OK, "ok".to_string()));
}

#[tokio::test]
async fn test_readiness_fails_when_store_is_down() {
    let app = app_with_store(Arc::new(FailingStore));

    let (status, _) = get(&app, "/health/ready").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let (app, _store) = memory_app();

    let (status, body) = get(&app, "/static/css/main.css").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(".order-form"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (app, _store) = memory_app();

    let (status, _) = get(&app, "/checkout").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
