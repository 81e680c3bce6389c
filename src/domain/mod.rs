//! Domain layer containing entities, collaborator traits and the access worker.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Store and access-log collaborator traits
//! - [`access_event`] - Access event model
//! - [`access_worker`] - Background access-log writer
//!
//! # Access Logging Flow
//!
//! 1. The redirect middleware resolves a link
//! 2. An [`access_event::AccessEvent`] is pushed onto a bounded channel with `try_send`
//! 3. [`access_worker::run_access_worker`] writes it through an
//!    [`repositories::AccessLogSink`] with bounded retries
//! 4. Failures are logged and dropped; the response never waits on any of this

pub mod access_event;
pub mod access_worker;
pub mod entities;
pub mod repositories;
