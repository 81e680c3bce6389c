//! Background worker draining the access-log queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::domain::access_event::AccessEvent;
use crate::domain::repositories::AccessLogSink;

/// Attempts per event, including the first one.
const MAX_ATTEMPTS: usize = 3;

/// Consumes access events until every sender is dropped.
///
/// Each event gets a bounded number of attempts with jittered exponential
/// backoff. An event that still fails is logged and discarded; nothing is
/// reported back to the request that produced it.
pub async fn run_access_worker(mut rx: mpsc::Receiver<AccessEvent>, sink: Arc<dyn AccessLogSink>) {
    while let Some(event) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(std::time::Duration::from_millis(500))
            .map(jitter)
            .take(MAX_ATTEMPTS - 1);

        match Retry::spawn(strategy, || sink.record(&event)).await {
            Ok(()) => debug!(slug = %event.slug, "Access event recorded"),
            Err(e) => warn!(slug = %event.slug, error = %e, "Failed to write access log"),
        }
    }

    debug!("Access log queue closed, worker exiting");
}
