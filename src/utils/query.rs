//! Query-string propagation onto destination URLs.

use url::{Url, form_urlencoded};

/// Merges an incoming query string into `destination`.
///
/// # Merge Rules
///
/// 1. Parameters already on the destination are kept
/// 2. An incoming parameter replaces every destination parameter with the same key
/// 3. Remaining incoming parameters are appended in request order
/// 4. Fragments on the destination are preserved
///
/// An empty incoming query returns the destination untouched. If the
/// destination is not an absolute URL the query is appended verbatim.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     with_query("https://dest.example/x", "utm=x"),
///     "https://dest.example/x?utm=x"
/// );
/// assert_eq!(
///     with_query("https://dest.example/x?a=1&utm=old", "utm=x"),
///     "https://dest.example/x?a=1&utm=x"
/// );
/// ```
pub fn with_query(destination: &str, query: &str) -> String {
    let incoming: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    if incoming.is_empty() {
        return destination.to_string();
    }

    match Url::parse(destination) {
        Ok(mut url) => {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .into_owned()
                .filter(|(key, _)| !incoming.iter().any(|(k, _)| k == key))
                .collect();

            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept)
                .extend_pairs(incoming);

            url.to_string()
        }
        Err(_) => {
            let separator = if destination.contains('?') { '&' } else { '?' };
            format!("{destination}{separator}{query}")
        }
    }
}
