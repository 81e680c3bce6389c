//! Link store adapters.
//!
//! Provides implementations of [`crate::domain::repositories::LinkStore`]:
//! - [`RedisLinkStore`] - Production Redis-backed store
//! - [`CachedLinkStore`] - TTL-hinted read cache in front of another store
//! - [`MemoryLinkStore`] - In-process store for development and testing

mod cached_store;
mod memory_store;
mod redis_store;

pub use cached_store::{CachedLinkStore, DEFAULT_READ_CACHE_CAPACITY};
pub use memory_store::MemoryLinkStore;
pub use redis_store::RedisLinkStore;
