//! All-orders listing page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

use super::views::OrderRowView;

/// All-orders page template.
#[derive(Template, WebTemplate)]
#[template(path = "all_orders.html")]
pub struct AllOrdersTemplate {
    pub orders: Vec<OrderRowView>,
}

/// List every stored order, oldest first.
///
/// GET /allorders
///
/// If the store fails the error is logged and the page renders empty.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> AllOrdersTemplate {
    let orders = match state.store().list_all().await {
        Ok(orders) => orders.iter().map(OrderRowView::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch orders");
            Vec::new()
        }
    };

    AllOrdersTemplate { orders }
}
