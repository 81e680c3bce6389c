//! Helpers for reading client metadata from HTTP request headers.

use axum::http::{HeaderMap, HeaderName, Uri, header};
use std::net::SocketAddr;

const CF_CONNECTING_IP: HeaderName = HeaderName::from_static("cf-connecting-ip");
const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
const X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");
const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Returns a header value as trimmed UTF-8, or `None` if absent, blank or not UTF-8.
pub fn header_str<'a, K>(headers: &'a HeaderMap, name: K) -> Option<&'a str>
where
    K: axum::http::header::AsHeaderName,
{
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Resolves the client IP address.
///
/// Checks `CF-Connecting-IP`, then the first hop of `X-Forwarded-For`, then
/// `X-Real-IP`, and finally the socket peer address.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    header_str(headers, &CF_CONNECTING_IP)
        .or_else(|| {
            header_str(headers, &X_FORWARDED_FOR)
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
        .or_else(|| header_str(headers, &X_REAL_IP))
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// Reconstructs the absolute URL the client requested.
///
/// The host comes from the `Host` header, or from the URI authority for
/// HTTP/2 requests that only carry `:authority`. The scheme comes from
/// `X-Forwarded-Proto` and defaults to `https`. Returns `None` when neither
/// host source is present.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "s.example.com".parse().unwrap());
///
/// let uri: Uri = "/promo?utm=x".parse().unwrap();
/// assert_eq!(
///     request_url(&headers, &uri).unwrap(),
///     "https://s.example.com/promo?utm=x"
/// );
/// ```
pub fn request_url(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let host = header_str(headers, header::HOST)
        .or_else(|| uri.authority().map(|a| a.as_str()))?;
    let scheme = header_str(headers, &X_FORWARDED_PROTO).unwrap_or("https");
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    Some(format!("{scheme}://{host}{path}"))
}
