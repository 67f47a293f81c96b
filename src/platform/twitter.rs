//! Twitter / X URL rules.

use crate::media::MediaType;
use crate::platform::{contains_any, Platform, PlatformStrategy};

const HOSTS: &[&str] = &["twitter.com", "x.com"];

/// Status links pointing at `/photo/N` are photos, the rest are videos.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwitterStrategy;

impl PlatformStrategy for TwitterStrategy {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn matches(&self, url: &str) -> bool {
        contains_any(url, HOSTS)
    }

    fn classify(&self, url: &str) -> MediaType {
        if url.contains("/photo/") {
            MediaType::Photo
        } else {
            MediaType::Video
        }
    }

    fn title(&self, media_type: MediaType) -> String {
        match media_type {
            MediaType::Photo => "Twitter Photo".to_string(),
            MediaType::Video => "Twitter Video".to_string(),
            MediaType::Audio => "Twitter Audio".to_string(),
        }
    }
}
