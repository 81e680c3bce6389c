//! In-process link store for development and tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::entities::Link;
use crate::domain::repositories::{LinkStore, StoreError, StoreResult, link_key};

/// A link store held entirely in memory.
///
/// Used when Redis is not configured, and by the test suite. Records are
/// always served fresh, so the TTL hint has nothing to act on.
#[derive(Default)]
pub struct MemoryLinkStore {
    records: RwLock<HashMap<String, Link>>,
}

impl MemoryLinkStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using in-memory link store");
        Self::default()
    }

    /// Creates a store holding the given links, keyed by their slug.
    pub fn with_links(links: impl IntoIterator<Item = Link>) -> Self {
        let store = Self::new();
        for link in links {
            store.insert(link);
        }
        store
    }

    /// Loads links from a JSON file containing an array of link records.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON array of links.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read links file {}", path.display()))?;
        let links: Vec<Link> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse links file {}", path.display()))?;

        info!("Loaded {} links from {}", links.len(), path.display());
        Ok(Self::with_links(links))
    }

    /// Stores a link under `link:<slug>`, exactly as its slug is spelled.
    pub fn insert(&self, link: Link) {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.insert(link_key(&link.slug), link);
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn get(&self, key: &str, _cache_ttl: Duration) -> StoreResult<Option<Link>> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Operation("memory store lock poisoned".to_string()))?;
        Ok(records.get(key).cloned())
    }

    async fn health_check(&self) -> bool {
        !self.records.is_poisoned()
    }
}
