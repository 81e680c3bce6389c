//! Application layer services implementing the resolution pipeline.
//!
//! This layer coordinates store lookups and request classification. Services
//! consume the domain traits and hand HTTP-free decisions to the API layer.
//!
//! # Available Services
//!
//! - [`services::link_resolver::LinkResolver`] - Slug lookup with case fallback
//! - [`services::destination_selector::DestinationSelector`] - Destination choice and traffic split
//! - [`services::redirect_service::RedirectService`] - Full decision pipeline

pub mod services;
