//! Read-through cache in front of any link store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::{debug, trace};

use crate::domain::entities::Link;
use crate::domain::repositories::{LinkStore, StoreResult};

/// Default maximum number of records held in the read cache.
pub const DEFAULT_READ_CACHE_CAPACITY: u64 = 10_000;

#[derive(Clone)]
struct CachedLink {
    link: Link,
    ttl: Duration,
}

/// Expires each cached record after the TTL hint it was fetched with.
struct HintedExpiry;

impl Expiry<String, CachedLink> for HintedExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedLink,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Link store decorator keeping found records in an in-process moka cache.
///
/// Each entry lives for the TTL hint given with the lookup that fetched it.
/// Misses and errors are never cached, and a zero hint goes straight to the
/// inner store.
pub struct CachedLinkStore {
    inner: Arc<dyn LinkStore>,
    cache: Cache<String, CachedLink>,
}

impl CachedLinkStore {
    /// Wraps `inner` with a cache of the default capacity.
    pub fn new(inner: Arc<dyn LinkStore>) -> Self {
        Self::with_capacity(inner, DEFAULT_READ_CACHE_CAPACITY)
    }

    /// Wraps `inner` with a cache holding at most `max_capacity` records.
    pub fn with_capacity(inner: Arc<dyn LinkStore>, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(HintedExpiry)
            .build();

        Self { inner, cache }
    }
}

#[async_trait]
impl LinkStore for CachedLinkStore {
    async fn get(&self, key: &str, cache_ttl: Duration) -> StoreResult<Option<Link>> {
        if cache_ttl.is_zero() {
            trace!("Cache bypass: {}", key);
            return self.inner.get(key, cache_ttl).await;
        }

        if let Some(cached) = self.cache.get(key).await {
            debug!("Cache HIT: {}", key);
            return Ok(Some(cached.link));
        }

        let link = self.inner.get(key, cache_ttl).await?;

        if let Some(found) = &link {
            debug!("Cache FILL: {} ({}s)", key, cache_ttl.as_secs());
            self.cache
                .insert(
                    key.to_string(),
                    CachedLink {
                        link: found.clone(),
                        ttl: cache_ttl,
                    },
                )
                .await;
        }

        Ok(link)
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }
}
