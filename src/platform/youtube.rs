//! YouTube URL rules.

use crate::media::MediaType;
use crate::platform::{contains_any, Platform, PlatformStrategy};

const HOSTS: &[&str] = &["youtube.com", "youtu.be"];

/// Everything on YouTube resolves as video.
#[derive(Debug, Clone, Copy, Default)]
pub struct YouTubeStrategy;

impl PlatformStrategy for YouTubeStrategy {
    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    fn matches(&self, url: &str) -> bool {
        contains_any(url, HOSTS)
    }

    fn classify(&self, _url: &str) -> MediaType {
        MediaType::Video
    }

    fn title(&self, _media_type: MediaType) -> String {
        "YouTube Video".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_links_match() {
        let strategy = YouTubeStrategy;
        assert!(strategy.matches("https://youtu.be/dQw4w9WgXcQ"));
        assert!(strategy.matches("m.youtube.com/watch?v=abc"));
        assert!(!strategy.matches("https://vimeo.com/1"));
    }

    #[test]
    fn test_always_video() {
        assert_eq!(
            YouTubeStrategy.classify("https://youtube.com/shorts/abc"),
            MediaType::Video
        );
    }
}
