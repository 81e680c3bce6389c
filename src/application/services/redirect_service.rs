//! Decision pipeline for slug requests.
//!
//! Runs normalizer → resolver → classifier → destination selector and returns
//! an [`Outcome`] describing what the HTTP layer should send back. Nothing here
//! touches HTTP types, so the same pipeline backs the admin CLI dry-run.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::application::services::{Destination, DestinationSelector, LinkResolver};
use crate::config::Config;
use crate::domain::access_event::ClientKind;
use crate::domain::entities::Link;
use crate::domain::repositories::{LinkStore, StoreResult};
use crate::utils::client_classifier::ClientClassifier;
use crate::utils::slug::{SlugDecision, SlugRules, normalize_path};

/// Request fields consumed by the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionRequest<'a> {
    /// Request path without the query string.
    pub path: &'a str,
    pub user_agent: Option<&'a str>,
    pub locale: Option<&'a str>,
}

/// What to do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Root path, send the visitor to the configured home URL.
    Home(String),
    /// Not a resolvable slug, or no usable record. The router handles it.
    PassThrough,
    /// A crawler asked for a known link.
    Preview(Link),
    /// A human asked for a known link.
    Redirect { link: Link, destination: Destination },
}

impl Outcome {
    /// Short label used for metrics and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Home(_) => "home",
            Outcome::PassThrough => "pass_through",
            Outcome::Preview(_) => "preview",
            Outcome::Redirect { destination, .. } if destination.diverted => "diverted",
            Outcome::Redirect { .. } => "redirect",
        }
    }

    /// Client classification behind a resolved outcome.
    pub fn client(&self) -> Option<ClientKind> {
        match self {
            Outcome::Preview(_) => Some(ClientKind::Bot),
            Outcome::Redirect { .. } => Some(ClientKind::Human),
            _ => None,
        }
    }
}

/// Orchestrates slug resolution and the bot/human branch.
pub struct RedirectService {
    rules: SlugRules,
    home_url: Option<String>,
    resolver: LinkResolver,
    classifier: ClientClassifier,
    selector: DestinationSelector,
}

impl RedirectService {
    pub fn new(
        rules: SlugRules,
        home_url: Option<String>,
        resolver: LinkResolver,
        classifier: ClientClassifier,
        selector: DestinationSelector,
    ) -> Self {
        Self {
            rules,
            home_url,
            resolver,
            classifier,
            selector,
        }
    }

    /// Builds the pipeline from loaded configuration.
    pub fn from_config(config: &Config, store: Arc<dyn LinkStore>) -> Self {
        Self::new(
            config.slug_rules(),
            config.home_url.clone(),
            LinkResolver::new(store, config.case_sensitive, config.link_cache_ttl()),
            ClientClassifier::new(config.bot_pattern.clone()),
            DestinationSelector::new(config.traffic_split.clone()),
        )
    }

    /// Decides how to answer a request.
    ///
    /// # Errors
    ///
    /// Returns the store error if a lookup fails. Validation failures and
    /// unknown slugs are not errors, they produce [`Outcome::PassThrough`].
    pub async fn decide(&self, request: &ResolutionRequest<'_>) -> StoreResult<Outcome> {
        let slug = match normalize_path(request.path, self.home_url.as_deref(), &self.rules) {
            SlugDecision::Home(url) => return Ok(Outcome::Home(url)),
            SlugDecision::Skip => {
                trace!(path = request.path, "Path is not a slug");
                return Ok(Outcome::PassThrough);
            }
            SlugDecision::Resolve(slug) => slug,
        };

        let Some(link) = self.resolver.resolve(&slug).await? else {
            debug!(slug, "Slug not found");
            return Ok(Outcome::PassThrough);
        };

        if self.classifier.classify(request.user_agent).is_bot() {
            debug!(slug, "Serving preview to crawler");
            return Ok(Outcome::Preview(link));
        }

        if !link.has_destination() {
            debug!(slug, "Link has no destination");
            return Ok(Outcome::PassThrough);
        }

        let destination = self.selector.select(&link, request.locale);
        Ok(Outcome::Redirect { link, destination })
    }
}
