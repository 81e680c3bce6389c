//! Destination selection with an optional locale-conditioned traffic split.

use rand::Rng;
use tracing::info;

use crate::domain::entities::Link;

/// Probabilistic substitution of a link's destination for visitors outside
/// one locale.
///
/// Visitors whose locale equals `exempt_locale` always get the stored
/// destination. Everyone else gets the stored destination or `alternate_url`
/// with equal probability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficSplitPolicy {
    exempt_locale: String,
    alternate_url: String,
}

impl TrafficSplitPolicy {
    pub fn new(exempt_locale: impl Into<String>, alternate_url: impl Into<String>) -> Self {
        Self {
            exempt_locale: exempt_locale.into(),
            alternate_url: alternate_url.into(),
        }
    }

    pub fn exempt_locale(&self) -> &str {
        &self.exempt_locale
    }

    pub fn alternate_url(&self) -> &str {
        &self.alternate_url
    }

    /// A missing locale is treated as exempt. The comparison is exact.
    fn applies_to(&self, locale: Option<&str>) -> bool {
        locale.is_some_and(|l| l != self.exempt_locale)
    }
}

/// The chosen destination for a human visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub url: String,
    /// True when the traffic split replaced the stored destination.
    pub diverted: bool,
}

/// Picks the destination URL for human visitors.
#[derive(Debug, Clone, Default)]
pub struct DestinationSelector {
    split: Option<TrafficSplitPolicy>,
}

impl DestinationSelector {
    pub fn new(split: Option<TrafficSplitPolicy>) -> Self {
        Self { split }
    }

    /// Chooses between the link's destination and the split alternate.
    ///
    /// Without a configured split this always returns `link.url`.
    pub fn select(&self, link: &Link, locale: Option<&str>) -> Destination {
        self.select_with(link, locale, &mut rand::rng())
    }

    fn select_with<R: Rng + ?Sized>(
        &self,
        link: &Link,
        locale: Option<&str>,
        rng: &mut R,
    ) -> Destination {
        if let Some(split) = &self.split
            && split.applies_to(locale)
            && rng.random_bool(0.5)
        {
            info!(
                slug = %link.slug,
                locale = locale.unwrap_or("-"),
                alternate = %split.alternate_url,
                "Traffic split diverted request"
            );
            return Destination {
                url: split.alternate_url.clone(),
                diverted: true,
            };
        }

        Destination {
            url: link.url.clone(),
            diverted: false,
        }
    }
}
