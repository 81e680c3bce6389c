//! HTTP request handlers for routed endpoints.

pub mod fallback;
pub mod health;
pub mod metrics;

pub use fallback::not_found_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
