//! Slug redirect middleware.
//!
//! Runs the resolution pipeline in front of the router. Resolved slugs are
//! answered here; everything else continues to the inner routes and fallback.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{Method, header},
    middleware::Next,
    response::Response,
};
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::application::services::{Outcome, ResolutionRequest};
use crate::domain::access_event::{AccessEvent, ClientInfo, ClientKind};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_info::{client_ip, header_str, request_url};

/// Resolves slug requests before they reach the router.
///
/// # Request Flow
///
/// 1. Skip anything that is not `GET` or `HEAD`
/// 2. Decide via [`crate::application::services::RedirectService`]
/// 3. Home → `302` to the configured home URL
/// 4. Crawler → preview document, human → redirect
/// 5. Push an [`AccessEvent`] onto the access queue without waiting
/// 6. No usable record → pass the request on unchanged
///
/// # Errors
///
/// Returns `503 Service Unavailable` if the link store fails. A store outage
/// is never reported as a missing link.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/health", get(health_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), redirect::layer));
/// ```
pub async fn layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return Ok(next.run(req).await);
    }

    let headers = req.headers();
    let locale = header_str(headers, state.config.locale_header.as_str());
    let request = ResolutionRequest {
        path: req.uri().path(),
        user_agent: header_str(headers, header::USER_AGENT),
        locale,
    };

    let outcome = match state.redirect_service.decide(&request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            metrics::counter!("redirect_outcomes_total", "outcome" => "store_error").increment(1);
            return Err(e.into());
        }
    };

    metrics::counter!("redirect_outcomes_total", "outcome" => outcome.label()).increment(1);

    match outcome {
        Outcome::PassThrough => Ok(next.run(req).await),
        Outcome::Home(url) => {
            debug!(home = %url, "Redirecting root path to home");
            state.composer.home(&url)
        }
        Outcome::Preview(link) => {
            let response = state
                .composer
                .preview(&link, request_url(req.headers(), req.uri()));
            enqueue_access(&state, &req, &link.slug, &link.url, ClientKind::Bot);
            Ok(response)
        }
        Outcome::Redirect { link, destination } => {
            let response = state
                .composer
                .redirect(&link, &destination.url, req.uri().query())?;
            enqueue_access(&state, &req, &link.slug, &destination.url, ClientKind::Human);
            Ok(response)
        }
    }
}

/// Hands an access event to the background worker.
///
/// Never blocks: a full or closed queue drops the event with a warning.
fn enqueue_access(state: &AppState, req: &Request, slug: &str, url: &str, client: ClientKind) {
    let headers = req.headers();
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let info = ClientInfo {
        user_agent: header_str(headers, header::USER_AGENT).map(str::to_string),
        referer: header_str(headers, header::REFERER).map(str::to_string),
        ip: client_ip(headers, peer),
        country: header_str(headers, state.config.locale_header.as_str()).map(str::to_string),
        language: header_str(headers, header::ACCEPT_LANGUAGE).map(str::to_string),
    };

    let event = AccessEvent::new(slug.to_string(), url.to_string(), client, info);

    match state.access_sender.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            warn!(slug = %event.slug, "Access log queue full, dropping event")
        }
        Err(TrySendError::Closed(event)) => {
            warn!(slug = %event.slug, "Access log queue closed, dropping event")
        }
    }
}
