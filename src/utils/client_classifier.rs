//! Bot/human classification from the declared client identity.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

use crate::domain::access_event::ClientKind;

/// Crawler and link-unfurler signatures, matched case-insensitively.
pub const DEFAULT_BOT_PATTERN: &str = "bot|crawler|spider|facebook|meta|whatsapp|discord|twitter|slack|telegram|preview|vkshare|skype|linkedin";

static DEFAULT_BOT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    build_pattern(DEFAULT_BOT_PATTERN).expect("built-in bot pattern is valid")
});

/// Compiles a signature pattern with case-insensitive matching.
pub fn build_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Classifies requests by their `User-Agent`.
#[derive(Debug, Clone)]
pub struct ClientClassifier {
    signatures: Regex,
}

impl ClientClassifier {
    pub fn new(signatures: Regex) -> Self {
        Self { signatures }
    }

    /// Classifies a client identity string.
    ///
    /// A missing or blank identity is treated as human.
    pub fn classify(&self, user_agent: Option<&str>) -> ClientKind {
        match user_agent.map(str::trim) {
            Some(ua) if !ua.is_empty() && self.signatures.is_match(ua) => ClientKind::Bot,
            _ => ClientKind::Human,
        }
    }
}

impl Default for ClientClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_BOT_REGEX.clone())
    }
}
