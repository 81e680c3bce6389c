//! Access-log sink appending JSON events to a capped Redis list.

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use tracing::debug;

use crate::domain::access_event::AccessEvent;
use crate::domain::repositories::{AccessLogError, AccessLogSink};

/// Default Redis list holding access events.
pub const DEFAULT_ACCESS_LOG_KEY: &str = "access_log";

/// Pushes serialized events onto the head of a Redis list and trims it.
///
/// The newest `max_len` events are kept; older entries are discarded by
/// `LTRIM` after every push. Downstream analytics consume the list.
pub struct RedisAccessLog {
    client: ConnectionManager,
    key: String,
    max_len: usize,
}

impl RedisAccessLog {
    pub fn new(client: ConnectionManager, key: impl Into<String>, max_len: usize) -> Self {
        Self {
            client,
            key: key.into(),
            max_len: max_len.max(1),
        }
    }
}

#[async_trait]
impl AccessLogSink for RedisAccessLog {
    async fn record(&self, event: &AccessEvent) -> Result<(), AccessLogError> {
        let payload = serde_json::to_string(event)?;
        let mut conn = self.client.clone();

        conn.lpush::<_, _, ()>(&self.key, payload)
            .await
            .map_err(|e| AccessLogError::Write(format!("LPUSH {}: {}", self.key, e)))?;

        conn.ltrim::<_, ()>(&self.key, 0, self.max_len as isize - 1)
            .await
            .map_err(|e| AccessLogError::Write(format!("LTRIM {}: {}", self.key, e)))?;

        debug!("Access event appended to {}", self.key);
        Ok(())
    }
}
