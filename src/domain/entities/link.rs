//! Link entity representing a stored slug → destination mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored short link with optional preview metadata.
///
/// Records are owned by an external writer and only ever read here. They are
/// stored as JSON with camelCase field names under `link:<slug>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub slug: String,
    /// Destination URL. May be empty for preview-only records.
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Creation time, epoch seconds.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    /// Expiry time, epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,
}

impl Link {
    /// Creates a link with only the required fields set.
    pub fn new(slug: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            url: url.into(),
            title: None,
            description: None,
            image: None,
            comment: None,
            created_at: Utc::now().timestamp(),
            updated_at: None,
            expiration: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_expiration(mut self, expiration: i64) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Returns true if the record can be used as a redirect target.
    pub fn has_destination(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expiration.is_some_and(|e| Utc::now().timestamp() >= e)
    }

    /// Creation time as a UTC timestamp, if representable.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let link = Link::new("promo", "https://dest.example/x").with_title("Promo");

        assert_eq!(link.slug, "promo");
        assert_eq!(link.url, "https://dest.example/x");
        assert_eq!(link.title.as_deref(), Some("Promo"));
        assert!(link.description.is_none());
        assert!(link.has_destination());
        assert!(!link.is_expired());
        assert!(link.created_at_utc().is_some());
    }

    #[test]
    fn test_link_deserialize_camel_case() {
        let json = r#"{
            "slug": "promo",
            "url": "https://dest.example/x",
            "title": "Promo",
            "createdAt": 1700000000,
            "updatedAt": 1700000100
        }"#;

        let link: Link = serde_json::from_str(json).unwrap();

        assert_eq!(link.slug, "promo");
        assert_eq!(link.created_at, 1_700_000_000);
        assert_eq!(link.updated_at, Some(1_700_000_100));
        assert!(link.image.is_none());
        assert!(link.expiration.is_none());
    }

    #[test]
    fn test_link_without_url_has_no_destination() {
        let link: Link = serde_json::from_str(r#"{"slug":"card","title":"Card"}"#).unwrap();

        assert!(!link.has_destination());
        assert_eq!(link.created_at, 0);
    }

    #[test]
    fn test_link_is_expired() {
        let past = Utc::now().timestamp() - 1;
        let link = Link::new("old", "https://example.com").with_expiration(past);
        assert!(link.is_expired());

        let future = Utc::now().timestamp() + 3600;
        let link = Link::new("new", "https://example.com").with_expiration(future);
        assert!(!link.is_expired());
    }
}
