//! Store trait for read-only link lookups.

use crate::domain::entities::Link;
use async_trait::async_trait;
use std::time::Duration;

/// Errors reported by a link store backend.
///
/// A store error is never treated as "not found": it surfaces to the caller
/// so outages are not mistaken for broken links.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store operation error: {0}")]
    Operation(String),

    #[error("Corrupt record under {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Builds the namespaced store key for a slug.
///
/// Link records share the store with other data, so every lookup goes
/// through the `link:` prefix.
pub fn link_key(slug: &str) -> String {
    format!("{}{}", LINK_KEY_PREFIX, slug)
}

/// Namespace prefix for link records.
pub const LINK_KEY_PREFIX: &str = "link:";

/// Read access to the external key-value store holding link records.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisLinkStore`] - Redis-backed store
/// - [`crate::infrastructure::store::MemoryLinkStore`] - In-process store for development and tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Fetches the record stored under `key`.
    ///
    /// `cache_ttl` is the freshness hint for the store's read cache. Callers
    /// pass it on every lookup; a stale read within that window is accepted.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` if a record exists
    /// - `Ok(None)` if the key is absent
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend is unreachable or the record
    /// cannot be decoded.
    async fn get(&self, key: &str, cache_ttl: Duration) -> StoreResult<Option<Link>>;

    /// Checks if the store backend is reachable.
    ///
    /// Used by the health endpoint.
    async fn health_check(&self) -> bool;
}
