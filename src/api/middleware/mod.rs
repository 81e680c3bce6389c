//! HTTP middleware for request processing.
//!
//! Provides slug resolution and observability middleware.

pub mod redirect;
pub mod tracing;
