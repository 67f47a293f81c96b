//! Instagram URL rules.

use crate::media::MediaType;
use crate::platform::{contains_any, Platform, PlatformStrategy};

const HOSTS: &[&str] = &["instagram.com"];

/// Posts under `/p/` are photos; reels and everything else are videos.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstagramStrategy;

impl PlatformStrategy for InstagramStrategy {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn matches(&self, url: &str) -> bool {
        contains_any(url, HOSTS)
    }

    fn classify(&self, url: &str) -> MediaType {
        if url.contains("/p/") {
            MediaType::Photo
        } else {
            MediaType::Video
        }
    }

    fn title(&self, media_type: MediaType) -> String {
        match media_type {
            MediaType::Photo => "Instagram Photo".to_string(),
            MediaType::Video => "Instagram Video".to_string(),
            MediaType::Audio => "Instagram Audio".to_string(),
        }
    }
}
