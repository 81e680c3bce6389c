//! Slug extraction and eligibility rules.
//!
//! Turns a raw request path into either a slug worth looking up or a decision
//! not to resolve at all. Everything here is pure.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Default slug pattern: alphanumeric words joined by single hyphens, any case.
pub const DEFAULT_SLUG_PATTERN: &str = r"(?i)^[a-z0-9]+(?:-[a-z0-9]+)*$";

/// Slugs reserved for other routes unless configured otherwise.
pub const DEFAULT_RESERVED_SLUGS: &[&str] = &["dashboard", "api", "health", "metrics"];

static DEFAULT_SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_SLUG_PATTERN).expect("built-in slug pattern is valid"));

/// What to do with a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugDecision {
    /// Root path with a home target configured.
    Home(String),
    /// An eligible slug to look up.
    Resolve(String),
    /// Not ours; let the rest of the router handle the request.
    Skip,
}

/// Validation rules applied to candidate slugs.
#[derive(Debug, Clone)]
pub struct SlugRules {
    pattern: Regex,
    reserved: HashSet<String>,
}

impl SlugRules {
    pub fn new<I, S>(pattern: Regex, reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pattern,
            reserved: reserved.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `slug` is non-empty, not reserved and matches the pattern.
    pub fn is_eligible(&self, slug: &str) -> bool {
        !slug.is_empty() && !self.reserved.contains(slug) && self.pattern.is_match(slug)
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn reserved(&self) -> &HashSet<String> {
        &self.reserved
    }
}

impl Default for SlugRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_SLUG_REGEX.clone(),
            DEFAULT_RESERVED_SLUGS.iter().copied(),
        )
    }
}

/// Extracts the candidate slug from a request path.
///
/// A single leading and a single trailing `/` are stripped, then the first
/// remaining segment is taken. The path must not include the query string.
///
/// ```ignore
/// assert_eq!(extract_slug("/promo/"), "promo");
/// assert_eq!(extract_slug("/promo/extra"), "promo");
/// assert_eq!(extract_slug("/"), "");
/// ```
pub fn extract_slug(path: &str) -> &str {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    trimmed.split('/').next().unwrap_or_default()
}

/// Decides whether a request path should be resolved.
///
/// # Rules
///
/// 1. Path exactly `/` with `home_url` set → [`SlugDecision::Home`]
/// 2. Eligible slug (see [`SlugRules::is_eligible`]) → [`SlugDecision::Resolve`]
/// 3. Anything else → [`SlugDecision::Skip`]
pub fn normalize_path(path: &str, home_url: Option<&str>, rules: &SlugRules) -> SlugDecision {
    if path == "/"
        && let Some(home) = home_url
    {
        return SlugDecision::Home(home.to_string());
    }

    let slug = extract_slug(path);

    if rules.is_eligible(slug) {
        SlugDecision::Resolve(slug.to_string())
    } else {
        SlugDecision::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_slug() {
        assert_eq!(extract_slug("/promo"), "promo");
        assert_eq!(extract_slug("/promo/"), "promo");
        assert_eq!(extract_slug("/promo/extra/parts"), "promo");
        assert_eq!(extract_slug("/"), "");
        assert_eq!(extract_slug(""), "");
        assert_eq!(extract_slug("//"), "");
    }

    #[test]
    fn test_root_redirects_home_when_configured() {
        let rules = SlugRules::default();

        assert_eq!(
            normalize_path("/", Some("https://home.example"), &rules),
            SlugDecision::Home("https://home.example".to_string())
        );
        assert_eq!(normalize_path("/", None, &rules), SlugDecision::Skip);
    }

    #[test]
    fn test_home_only_applies_to_root() {
        let rules = SlugRules::default();

        assert_eq!(
            normalize_path("/promo", Some("https://home.example"), &rules),
            SlugDecision::Resolve("promo".to_string())
        );
    }

    #[test]
    fn test_reserved_slugs_are_skipped() {
        let rules = SlugRules::default();

        for slug in DEFAULT_RESERVED_SLUGS {
            assert_eq!(
                normalize_path(&format!("/{slug}"), None, &rules),
                SlugDecision::Skip,
                "reserved slug {slug} must not resolve"
            );
        }
    }

    #[test]
    fn test_pattern_mismatch_is_skipped() {
        let rules = SlugRules::default();

        for path in ["/favicon.ico", "/-promo", "/promo-", "/a--b", "/pro_mo", "/%20"] {
            assert_eq!(normalize_path(path, None, &rules), SlugDecision::Skip, "{path}");
        }
    }

    #[test]
    fn test_default_pattern_is_case_insensitive() {
        let rules = SlugRules::default();

        assert_eq!(
            normalize_path("/Promo-2024", None, &rules),
            SlugDecision::Resolve("Promo-2024".to_string())
        );
    }

    #[test]
    fn test_custom_rules() {
        let rules = SlugRules::new(Regex::new(r"^[a-z]{3}$").unwrap(), ["abc"]);

        assert!(!rules.is_eligible("abc"));
        assert!(rules.is_eligible("xyz"));
        assert!(!rules.is_eligible("xyzw"));
        assert!(!rules.is_eligible(""));
    }
}
