//! Resolution services for the application layer.

pub mod destination_selector;
pub mod link_resolver;
pub mod redirect_service;

pub use destination_selector::{Destination, DestinationSelector, TrafficSplitPolicy};
pub use link_resolver::LinkResolver;
pub use redirect_service::{Outcome, RedirectService, ResolutionRequest};
