//! Access event model for fire-and-forget access logging.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// How the request's client identity was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    Bot,
    Human,
}

impl ClientKind {
    pub fn is_bot(self) -> bool {
        matches!(self, ClientKind::Bot)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClientKind::Bot => "bot",
            ClientKind::Human => "human",
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One successful resolution, as handed to the access logger.
///
/// Created in the redirect middleware once a link has been found, pushed onto
/// a bounded channel without waiting, and persisted by
/// [`crate::domain::access_worker::run_access_worker`].
///
/// All client metadata is optional so missing headers never prevent logging.
#[derive(Debug, Clone, Serialize)]
pub struct AccessEvent {
    pub slug: String,
    pub url: String,
    pub client: ClientKind,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub accessed_at: DateTime<Utc>,
}

/// Request metadata captured for an [`AccessEvent`].
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
}

impl AccessEvent {
    /// Creates an access event stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = AccessEvent::new(
    ///     "promo".to_string(),
    ///     "https://dest.example/x".to_string(),
    ///     ClientKind::Human,
    ///     ClientInfo::default(),
    /// );
    /// ```
    pub fn new(slug: String, url: String, client: ClientKind, info: ClientInfo) -> Self {
        Self {
            slug,
            url,
            client,
            user_agent: info.user_agent,
            referer: info.referer,
            ip: info.ip,
            country: info.country,
            language: info.language,
            accessed_at: Utc::now(),
        }
    }
}
