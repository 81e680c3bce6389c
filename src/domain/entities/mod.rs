//! Core domain entities.
//!
//! - [`Link`] - A stored slug → destination mapping with preview metadata
//!
//! Entities are plain data structures read from external collaborators. This
//! crate never creates or mutates stored records.

pub mod link;

pub use link::Link;
