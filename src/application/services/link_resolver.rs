//! Slug-to-record resolution with optional case fallback.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::entities::Link;
use crate::domain::repositories::{LinkStore, StoreResult, link_key};

/// Looks up link records for eligible slugs.
///
/// In case-insensitive mode the lowercased slug is tried first and the
/// slug as written is tried only if that misses and differs. In
/// case-sensitive mode exactly one lookup is made.
pub struct LinkResolver {
    store: Arc<dyn LinkStore>,
    case_sensitive: bool,
    cache_ttl: Duration,
}

impl LinkResolver {
    pub fn new(store: Arc<dyn LinkStore>, case_sensitive: bool, cache_ttl: Duration) -> Self {
        Self {
            store,
            case_sensitive,
            cache_ttl,
        }
    }

    /// Resolves a slug to its record.
    ///
    /// Expired records are reported as absent.
    ///
    /// # Errors
    ///
    /// Store failures are propagated and never collapsed into "not found".
    pub async fn resolve(&self, slug: &str) -> StoreResult<Option<Link>> {
        let link = if self.case_sensitive {
            self.lookup(slug).await?
        } else {
            let lowered = slug.to_lowercase();
            match self.lookup(&lowered).await? {
                Some(link) => Some(link),
                None if lowered != slug => {
                    debug!(slug, "Lowercase lookup missed, retrying original case");
                    self.lookup(slug).await?
                }
                None => None,
            }
        };

        Ok(link.filter(|l| {
            let expired = l.is_expired();
            if expired {
                debug!(slug = %l.slug, "Link expired");
            }
            !expired
        }))
    }

    async fn lookup(&self, slug: &str) -> StoreResult<Option<Link>> {
        self.store.get(&link_key(slug), self.cache_ttl).await
    }
}
