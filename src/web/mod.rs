//! HTML rendering and response composition.
//!
//! Uses Askama templates for server-side rendering of crawler previews and
//! client-side navigation documents.
//!
//! # Modules
//!
//! - [`composer`] - Maps pipeline outcomes to HTTP responses
//! - [`templates`] - Template structs backed by `templates/*.html`

pub mod composer;
pub mod templates;

pub use composer::ResponseComposer;
