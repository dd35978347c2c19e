//! Health check endpoints.

use axum::{extract::State, http::Uri};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the order store answers before returning OK; otherwise
/// responds 503 Service Unavailable.
pub async fn readiness(State(state): State<AppState>) -> Result<&'static str> {
    state.store().ping().await?;
    Ok("ok")
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
