//! Handler for the Prometheus metrics endpoint.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Renders the counters recorded through the `metrics` facade.
///
/// # Endpoint
///
/// `GET /metrics`
///
/// # Response Codes
///
/// - **200 OK**: Prometheus text exposition
/// - **404 Not Found**: No recorder installed
pub async fn metrics_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let handle = state.metrics.as_ref().ok_or_else(|| {
        AppError::not_found("Metrics are not enabled", json!({ "path": "/metrics" }))
    })?;

    Ok((
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        handle.render(),
    )
        .into_response())
}
