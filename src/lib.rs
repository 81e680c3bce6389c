//! # Slug Redirector
//!
//! Resolves short path segments ("slugs") to stored link records and answers
//! with a redirect for people or a link-preview document for crawlers.
//! Built with Axum and Redis.
//!
//! ## Architecture
//!
//! This crate keeps the same layer separation throughout:
//!
//! - **Domain Layer** ([`domain`]) - Link entity, access events, store and sink traits
//! - **Application Layer** ([`application`]) - Resolution pipeline and destination policy
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores, access-log sinks
//! - **API Layer** ([`api`]) - Redirect middleware, health endpoint, tracing
//! - **Web Layer** ([`web`]) - Preview and navigation templates, response composition
//!
//! ## Features
//!
//! - Slug validation with a reserved-word set
//! - Case-insensitive lookup with exact-case fallback
//! - Open Graph previews for social crawlers
//! - HTTP or script-based (no referrer) redirects with optional query propagation
//! - Optional locale-conditioned traffic split
//! - Fire-and-forget access logging with retry
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"  # Optional, in-memory store otherwise
//! export LINKS_FILE="links.json"             # Seed for the in-memory store
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{Outcome, RedirectService, ResolutionRequest};
    pub use crate::config::Config;
    pub use crate::domain::access_event::{AccessEvent, ClientKind};
    pub use crate::domain::entities::Link;
    pub use crate::domain::repositories::{LinkStore, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::MemoryLinkStore;
    pub use crate::routes::app_router;
    pub use crate::state::AppState;
}
