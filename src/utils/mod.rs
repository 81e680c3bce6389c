//! Pure helpers used by the resolution pipeline and the HTTP layer.
//!
//! - [`slug`] - Slug extraction and eligibility rules
//! - [`client_classifier`] - Bot/human classification
//! - [`query`] - Query-string propagation onto destinations
//! - [`request_info`] - Client metadata from request headers

pub mod client_classifier;
pub mod query;
pub mod request_info;
pub mod slug;
