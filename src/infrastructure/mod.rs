//! Infrastructure layer for external collaborators.
//!
//! Implements the collaborator traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`store`] - Link store adapters (Redis and in-memory)
//! - [`access_log`] - Access-log sinks (tracing and Redis)

pub mod access_log;
pub mod store;
