//! Redis-backed link store.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info};

use crate::domain::entities::Link;
use crate::domain::repositories::{LinkStore, StoreError, StoreResult};

/// Link store reading JSON records from Redis.
///
/// Uses a `ConnectionManager` for connection reuse and automatic reconnects.
/// Every call is a Redis GET; wrap it in
/// [`CachedLinkStore`](super::CachedLinkStore) to honor the TTL hint.
///
/// Unlike a pure cache, errors are not swallowed: a failed GET is reported as
/// [`StoreError`] so the caller can tell an outage from a missing link.
pub struct RedisLinkStore {
    client: ConnectionManager,
}

impl RedisLinkStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        info!("Connecting to Redis link store");

        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis link store");

        Ok(Self::from_manager(manager))
    }

    /// Wraps an existing connection manager.
    pub fn from_manager(client: ConnectionManager) -> Self {
        Self { client }
    }

    /// Returns a clone of the underlying connection manager.
    pub fn connection(&self) -> ConnectionManager {
        self.client.clone()
    }

    async fn fetch(&self, key: &str) -> StoreResult<Option<Link>> {
        let mut conn = self.client.clone();

        let raw = conn.get::<_, Option<String>>(key).await.map_err(|e| {
            error!("Redis GET error for {}: {}", key, e);
            StoreError::Operation(e.to_string())
        })?;

        raw.map(|json| {
            serde_json::from_str::<Link>(&json).map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn get(&self, key: &str, _cache_ttl: Duration) -> StoreResult<Option<Link>> {
        let link = self.fetch(key).await?;

        match &link {
            Some(_) => debug!("Store GET: {}", key),
            None => debug!("Store MISS: {}", key),
        }

        Ok(link)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
