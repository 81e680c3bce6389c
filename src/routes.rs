//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{slug}`   - Slug resolution (redirect or crawler preview)
//! - `GET  /`         - Home redirect, when configured
//! - `GET  /health`   - Health check: store, access queue
//! - anything else    - JSON `404 Not Found`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Redirect** - Slug resolution in front of every route and the fallback

use crate::api;
use crate::api::handlers::not_found_handler;
use crate::api::middleware::{redirect, tracing};
use crate::state::AppState;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// Slug resolution runs as a layer rather than a `/{slug}` route so that the
/// root path and ineligible paths fall through to the routes and fallback
/// untouched.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::public_routes())
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(state.clone(), redirect::layer))
        .with_state(state)
        .layer(tracing::layer())
}
