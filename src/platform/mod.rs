//! Platform detection and per-platform media classification.
//!
//! Every supported network is a [`PlatformStrategy`]. Detection walks the
//! known strategies in a fixed order (Instagram, YouTube, Twitter) and the
//! first one whose host fragments appear in the URL wins. Anything else
//! falls through to the [`unknown::UnknownStrategy`].

pub mod instagram;
pub mod twitter;
pub mod unknown;
pub mod youtube;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::media::MediaType;

pub use instagram::InstagramStrategy;
pub use twitter::TwitterStrategy;
pub use unknown::UnknownStrategy;
pub use youtube::YouTubeStrategy;

/// Source social network of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    #[serde(rename = "youtube")]
    YouTube,
    Twitter,
    #[default]
    Unknown,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::YouTube => "youtube",
            Platform::Twitter => "twitter",
            Platform::Unknown => "unknown",
        }
    }

    /// Strategy implementing this platform's classification rules.
    pub fn strategy(&self) -> &'static dyn PlatformStrategy {
        match self {
            Platform::Instagram => &InstagramStrategy,
            Platform::YouTube => &YouTubeStrategy,
            Platform::Twitter => &TwitterStrategy,
            Platform::Unknown => &UnknownStrategy,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "youtube" => Ok(Platform::YouTube),
            "twitter" | "x" => Ok(Platform::Twitter),
            "unknown" => Ok(Platform::Unknown),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// Per-platform rules shared by detection and media-info resolution.
pub trait PlatformStrategy: Send + Sync {
    /// Tag this strategy is responsible for.
    fn platform(&self) -> Platform;

    /// Whether the URL belongs to this platform.
    fn matches(&self, url: &str) -> bool;

    /// Classify what kind of media the URL points at.
    fn classify(&self, url: &str) -> MediaType;

    /// Display title for a resolved item of the given type.
    fn title(&self, media_type: MediaType) -> String;
}

/// Strategies tried by [`detect`], in priority order.
static KNOWN_STRATEGIES: &[&dyn PlatformStrategy] =
    &[&InstagramStrategy, &YouTubeStrategy, &TwitterStrategy];

/// Check whether any of the host fragments appears in the URL.
pub(crate) fn contains_any(url: &str, fragments: &[&str]) -> bool {
    let lower = url.to_lowercase();
    fragments.iter().any(|fragment| lower.contains(fragment))
}

/// Map a URL to its platform tag. Never fails.
pub fn detect(url: &str) -> Platform {
    detect_strategy(url).platform()
}

/// Find the strategy whose host fragments match the URL.
pub fn detect_strategy(url: &str) -> &'static dyn PlatformStrategy {
    KNOWN_STRATEGIES
        .iter()
        .copied()
        .find(|strategy| strategy.matches(url))
        .unwrap_or(&UnknownStrategy)
}

/// Parse a user-supplied platform hint.
///
/// `auto` and the empty string mean "no hint".
pub fn parse_hint(input: &str) -> std::result::Result<Option<Platform>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}
