//! Access-log sink adapters.
//!
//! - [`TracingAccessLog`] - Structured log line on the `access_log` target
//! - [`RedisAccessLog`] - Capped Redis list of JSON events

mod redis_sink;
mod tracing_sink;

pub use redis_sink::{DEFAULT_ACCESS_LOG_KEY, RedisAccessLog};
pub use tracing_sink::TracingAccessLog;
