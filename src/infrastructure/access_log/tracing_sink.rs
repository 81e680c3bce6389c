//! Access-log sink writing structured tracing events.

use async_trait::async_trait;
use tracing::info;

use crate::domain::access_event::AccessEvent;
use crate::domain::repositories::{AccessLogError, AccessLogSink};

/// Emits each access event as an `INFO` record on the `access_log` target.
///
/// Pair with `RUST_LOG=access_log=info` and `LOG_FORMAT=json` to ship access
/// logs through the regular log pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAccessLog;

#[async_trait]
impl AccessLogSink for TracingAccessLog {
    async fn record(&self, event: &AccessEvent) -> Result<(), AccessLogError> {
        info!(
            target: "access_log",
            slug = %event.slug,
            url = %event.url,
            client = %event.client,
            ip = event.ip.as_deref().unwrap_or("-"),
            country = event.country.as_deref().unwrap_or("-"),
            language = event.language.as_deref().unwrap_or("-"),
            referer = event.referer.as_deref().unwrap_or("-"),
            user_agent = event.user_agent.as_deref().unwrap_or("-"),
            accessed_at = %event.accessed_at.to_rfc3339(),
            "access"
        );
        Ok(())
    }
}
