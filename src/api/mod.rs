//! HTTP layer for slug resolution and service endpoints.
//!
//! This layer translates HTTP requests into pipeline decisions and formats
//! the responses.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for JSON responses
//! - [`handlers`] - Health and fallback handlers
//! - [`middleware`] - Slug redirect and tracing middleware
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
