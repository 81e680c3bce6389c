//! Sink trait for the access-log collaborator.

use crate::domain::access_event::AccessEvent;
use async_trait::async_trait;

/// Errors reported by an access-log sink.
#[derive(Debug, thiserror::Error)]
pub enum AccessLogError {
    #[error("Access log write failed: {0}")]
    Write(String),

    #[error("Access log encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Destination for access events.
///
/// Only the background worker calls this; request handlers never await it.
///
/// # Implementations
///
/// - [`crate::infrastructure::access_log::TracingAccessLog`] - Structured log line
/// - [`crate::infrastructure::access_log::RedisAccessLog`] - Capped Redis list
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLogSink: Send + Sync {
    /// Records a single access event.
    async fn record(&self, event: &AccessEvent) -> Result<(), AccessLogError>;
}
