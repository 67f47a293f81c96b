//! Fallback for URLs no known platform claims.

use crate::media::MediaType;
use crate::platform::{Platform, PlatformStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownStrategy;

impl PlatformStrategy for UnknownStrategy {
    fn platform(&self) -> Platform {
        Platform::Unknown
    }

    fn matches(&self, _url: &str) -> bool {
        true
    }

    fn classify(&self, _url: &str) -> MediaType {
        MediaType::Video
    }

    fn title(&self, _media_type: MediaType) -> String {
        "Media Title".to_string()
    }
}
