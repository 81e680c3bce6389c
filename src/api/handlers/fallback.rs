//! Fallback for requests no route or slug claimed.

use axum::http::Uri;
use serde_json::json;

use crate::error::AppError;

/// Answers unmatched paths with a JSON `404 Not Found`.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Not found", json!({ "path": uri.path() }))
}
