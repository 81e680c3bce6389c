//! Turns pipeline outcomes into HTTP responses.

use axum::body::Body;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::config::{Config, PreviewConfig, RedirectMode};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::utils::query::with_query;
use crate::web::templates::{NavigateTemplate, PreviewTemplate};

/// Builds preview documents and redirects.
///
/// # Human Responses
///
/// - [`RedirectMode::Http`] - configured status code with a `Location` header
/// - [`RedirectMode::Script`] - `200 OK` document navigating with `rel="noreferrer"`
///
/// Both carry `Cache-Control: no-store`.
#[derive(Debug, Clone)]
pub struct ResponseComposer {
    mode: RedirectMode,
    status: StatusCode,
    redirect_with_query: bool,
    preview: PreviewConfig,
}

impl ResponseComposer {
    pub fn new(
        mode: RedirectMode,
        status: StatusCode,
        redirect_with_query: bool,
        preview: PreviewConfig,
    ) -> Self {
        Self {
            mode,
            status,
            redirect_with_query,
            preview,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let status = StatusCode::from_u16(config.redirect_status_code)
            .unwrap_or(StatusCode::MOVED_PERMANENTLY);

        Self::new(
            config.redirect_mode,
            status,
            config.redirect_with_query,
            config.preview.clone(),
        )
    }

    /// Final URL for a human visitor, after query propagation.
    pub fn target(&self, destination: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if self.redirect_with_query => with_query(destination, q),
            _ => destination.to_string(),
        }
    }

    /// `302 Found` to the home URL.
    pub fn home(&self, url: &str) -> Result<Response, AppError> {
        location_response(StatusCode::FOUND, url)
    }

    /// Crawler preview for `link`.
    ///
    /// `request_url` is the short link as requested; the stored destination
    /// is used as the canonical URL when it is unknown.
    pub fn preview(&self, link: &Link, request_url: Option<String>) -> Response {
        let url = request_url.unwrap_or_else(|| link.url.clone());
        PreviewTemplate::for_link(link, url, &self.preview).into_response()
    }

    /// Sends a human visitor to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the target cannot be used as a
    /// `Location` header value.
    pub fn redirect(
        &self,
        link: &Link,
        destination: &str,
        query: Option<&str>,
    ) -> Result<Response, AppError> {
        let target = self.target(destination, query);

        let mut response = match self.mode {
            RedirectMode::Http => location_response(self.status, &target)?,
            RedirectMode::Script => {
                let title = link.title.clone().unwrap_or_else(|| target.clone());
                let mut response = NavigateTemplate::new(title, target).into_response();
                response.headers_mut().insert(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                );
                response
            }
        };

        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

        Ok(response)
    }
}

fn location_response(status: StatusCode, target: &str) -> Result<Response, AppError> {
    let location = HeaderValue::try_from(target).map_err(|_| {
        AppError::internal("Invalid redirect target", json!({ "target": target }))
    })?;

    Response::builder()
        .status(status)
        .header(header::LOCATION, location)
        .body(Body::empty())
        .map_err(|e| AppError::internal("Failed to build redirect", json!({ "reason": e.to_string() })))
}
