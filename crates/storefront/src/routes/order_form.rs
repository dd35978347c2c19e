//! Order form route handlers.
//!
//! `GET /` renders an empty form. `POST /` validates the submission and
//! either re-renders the form with every error, or prices the order,
//! hands it to the store in the background, and renders the receipt.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use tracing::{Instrument, instrument};

use plant_shop_core::{OrderSubmission, PricedOrder, PricingConfig, UnitPrices};

use crate::db::OrderStore;
use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

use super::views::{
    ErrorView, ReceiptView, SelectOption, delivery_options, province_options,
};

/// Order form page; also carries the receipt after a successful order.
#[derive(Template, WebTemplate)]
#[template(path = "order_form.html")]
pub struct OrderFormTemplate {
    /// Values to put back into the inputs.
    pub form: OrderSubmission,
    pub provinces: Vec<SelectOption>,
    pub delivery_times: Vec<SelectOption>,
    pub unit_prices: UnitPrices,
    pub errors: Vec<ErrorView>,
    pub receipt: Option<ReceiptView>,
}

impl OrderFormTemplate {
    fn new(config: &PricingConfig, form: OrderSubmission) -> Self {
        Self {
            provinces: province_options(config, form.province.trim()),
            delivery_times: delivery_options(config, form.delivery_time.trim()),
            unit_prices: config.unit_prices,
            form,
            errors: Vec::new(),
            receipt: None,
        }
    }
}

/// Render the empty order form.
///
/// GET /
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> OrderFormTemplate {
    OrderFormTemplate::new(state.pricer().config(), OrderSubmission::default())
}

/// Validate, price, and persist an order.
///
/// POST /
///
/// The body is read as raw pairs so that repeated or unknown fields still
/// reach validation; only a non-form request is a 400. Validation failures
/// are answered with the form, the submitted values, and the full error
/// list. The receipt does not wait for the store.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(pairs) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let submission = OrderSubmission::from_pairs(pairs);
    let pricer = state.pricer();

    let validated = match pricer.validate(&submission) {
        Ok(validated) => validated,
        Err(errors) => {
            tracing::info!(error_count = errors.len(), "Order form rejected");
            let mut page = OrderFormTemplate::new(pricer.config(), submission);
            page.errors = ErrorView::from_errors(&errors);
            return Ok(page.into_response());
        }
    };

    let order = pricer.price(validated);
    tracing::info!(
        province = %order.province,
        total = %order.total,
        "Order priced"
    );
    add_breadcrumb(
        "order",
        "Order priced",
        Some(&[
            ("province", order.province.as_str()),
            ("total", &order.total.to_string()),
        ]),
    );

    let receipt = ReceiptView::new(&order, &pricer.config().unit_prices);
    save_in_background(state.store(), order);

    let mut page = OrderFormTemplate::new(pricer.config(), OrderSubmission::default());
    page.receipt = Some(receipt);
    Ok(page.into_response())
}

/// Write the order without making the response wait.
///
/// A failed write is logged and reported to Sentry; it is not retried and
/// the customer still sees the receipt.
fn save_in_background(store: Arc<dyn OrderStore>, order: PricedOrder) {
    tokio::spawn(
        async move {
            match store.save(&order).await {
                Ok(id) => tracing::info!(order_id = %id, "New order added successfully"),
                Err(e) => {
                    let event_id = sentry::capture_error(&e);
                    tracing::error!(
                        error = %e,
                        sentry_event_id = %event_id,
                        email = %order.email,
                        "Failed to save order"
                    );
                }
            }
        }
        .in_current_span(),
    );
}
