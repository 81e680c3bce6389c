//! Collaborator trait definitions for the domain layer.
//!
//! The store and the access-log writer are owned by other systems. These
//! traits describe only what the resolution pipeline consumes from them;
//! implementations live in `crate::infrastructure`.
//!
//! - [`LinkStore`] - Read-only link lookups with a cache TTL hint
//! - [`AccessLogSink`] - Access event persistence

pub mod access_log;
pub mod link_store;

pub use access_log::{AccessLogError, AccessLogSink};
pub use link_store::{LINK_KEY_PREFIX, LinkStore, StoreError, StoreResult, link_key};

#[cfg(test)]
pub use access_log::MockAccessLogSink;
#[cfg(test)]
pub use link_store::MockLinkStore;
