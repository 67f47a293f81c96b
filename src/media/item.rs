//! Media description types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::platform::Platform;

/// Type of media content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Video,
    #[serde(alias = "image")]
    Photo,
    Audio,
}

impl MediaType {
    /// Get the folder name for this media type.
    pub fn folder_name(&self) -> &'static str {
        match self {
            MediaType::Video => "Video",
            MediaType::Photo => "Image",
            MediaType::Audio => "Audio",
        }
    }

    /// File extension used when the caller does not pick a format.
    pub fn default_format(&self) -> &'static str {
        match self {
            MediaType::Video => "mp4",
            MediaType::Photo => "jpg",
            MediaType::Audio => "mp3",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Video => "video",
            MediaType::Photo => "photo",
            MediaType::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "video" => Ok(MediaType::Video),
            "photo" | "image" => Ok(MediaType::Photo),
            "audio" => Ok(MediaType::Audio),
            _ => Err(format!("Unknown media type: {}", s)),
        }
    }
}

/// Descriptive metadata for a resolved URL.
///
/// Immutable once resolved; a new resolution replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub thumbnail_url: String,

    /// Playback length, only present for time-based media.
    #[serde(default)]
    pub duration: Option<String>,

    /// Normalized URL the user asked for.
    pub source_url: String,

    /// Reference handed to the persistence adapter.
    pub download_source: String,

    pub media_type: MediaType,

    pub platform: Platform,

    /// Quality label, e.g. "HD".
    #[serde(default)]
    pub quality: String,

    /// Human-readable size estimate, e.g. "15MB".
    #[serde(default)]
    pub approximate_size: String,

    /// Candidate formats, best first.
    #[serde(default)]
    pub candidate_formats: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_names() {
        assert_eq!(MediaType::Video.folder_name(), "Video");
        assert_eq!(MediaType::Photo.folder_name(), "Image");
        assert_eq!(MediaType::Audio.folder_name(), "Audio");
    }

    #[test]
    fn test_media_type_parses_image_alias() {
        assert_eq!("image".parse::<MediaType>().unwrap(), MediaType::Photo);
        assert_eq!("VIDEO".parse::<MediaType>().unwrap(), MediaType::Video);
        assert!("gif".parse::<MediaType>().is_err());

        let parsed: MediaType = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(parsed, MediaType::Photo);
    }

    #[test]
    fn test_media_info_uses_camel_case_keys() {
        let info = MediaInfo {
            title: "YouTube Video".into(),
            description: String::new(),
            thumbnail_url: String::new(),
            duration: Some("00:01:30".into()),
            source_url: "https://youtube.com/watch?v=abc".into(),
            download_source: "https://youtube.com/watch?v=abc".into(),
            media_type: MediaType::Video,
            platform: Platform::YouTube,
            quality: "HD".into(),
            approximate_size: "15MB".into(),
            candidate_formats: vec!["720p".into()],
        };

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["mediaType"], "video");
        assert_eq!(json["platform"], "youtube");
        assert_eq!(json["downloadSource"], "https://youtube.com/watch?v=abc");
        assert_eq!(json["candidateFormats"][0], "720p");
    }
}
