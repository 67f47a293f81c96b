//! Media info resolution.
//!
//! The [`MediaResolver`] trait is the seam a real extractor plugs into. The
//! bundled [`PlaceholderResolver`] produces synthetic metadata from the
//! matching [`PlatformStrategy`](crate::platform::PlatformStrategy), so the
//! rest of the pipeline can run without talking to any platform.

use async_trait::async_trait;
use url::Url;

use crate::error::{Error, Result};
use crate::media::item::{MediaInfo, MediaType};
use crate::platform::{self, Platform, PlatformStrategy};

const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/300x200";
const PLACEHOLDER_DURATION: &str = "00:01:30";
const PLACEHOLDER_QUALITY: &str = "HD";
const PLACEHOLDER_SIZE: &str = "15MB";
const VIDEO_FORMATS: &[&str] = &["720p", "480p", "360p"];

/// Turns a user-supplied URL into a [`MediaInfo`].
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Resolve a URL. A hint naming a known platform overrides detection.
    async fn resolve(&self, url: &str, platform_hint: Option<Platform>) -> Result<MediaInfo>;
}

/// Normalize a user-supplied URL, prepending `https://` when no scheme is given.
///
/// Returns the normalized string; fails on empty input or anything that does
/// not parse as a URL with a host.
pub fn normalize_url(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::Resolution("URL is empty".to_string()));
    }

    let lower = trimmed.to_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&candidate)
        .map_err(|e| Error::Resolution(format!("Malformed URL '{}': {}", trimmed, e)))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(candidate),
        _ => Err(Error::Resolution(format!("URL has no host: '{}'", trimmed))),
    }
}

/// Pick the strategy for a normalized URL, honoring a known-platform hint.
fn select_strategy(url: &str, hint: Option<Platform>) -> &'static dyn PlatformStrategy {
    match hint {
        Some(platform) if platform != Platform::Unknown => platform.strategy(),
        _ => platform::detect_strategy(url),
    }
}

/// Resolver producing synthetic metadata from URL patterns only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderResolver;

impl PlaceholderResolver {
    pub fn new() -> Self {
        Self
    }

    /// Build the metadata for an already-normalized URL.
    fn describe(&self, url: String, strategy: &dyn PlatformStrategy) -> MediaInfo {
        let media_type = strategy.classify(&url);
        let platform = strategy.platform();
        let is_video = media_type == MediaType::Video;

        MediaInfo {
            title: strategy.title(media_type),
            description: format!("This is a sample {} from {}", media_type, platform),
            thumbnail_url: PLACEHOLDER_THUMBNAIL.to_string(),
            duration: is_video.then(|| PLACEHOLDER_DURATION.to_string()),
            download_source: url.clone(),
            source_url: url,
            media_type,
            platform,
            quality: PLACEHOLDER_QUALITY.to_string(),
            approximate_size: PLACEHOLDER_SIZE.to_string(),
            candidate_formats: if is_video {
                VIDEO_FORMATS.iter().map(|f| f.to_string()).collect()
            } else {
                Vec::new()
            },
        }
    }
}

#[async_trait]
impl MediaResolver for PlaceholderResolver {
    async fn resolve(&self, url: &str, platform_hint: Option<Platform>) -> Result<MediaInfo> {
        let url = normalize_url(url)?;
        let strategy = select_strategy(&url, platform_hint);

        tracing::debug!("Resolving {} as {}", url, strategy.platform());

        Ok(self.describe(url, strategy))
    }
}
