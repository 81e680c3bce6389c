//! Routes served alongside slug resolution.

use crate::api::handlers::{health_handler, metrics_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public routes, no authentication.
///
/// # Endpoints
///
/// - `GET /health` - Store and access-queue status
/// - `GET /metrics` - Prometheus exposition
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
}
