//! User preference model.
//!
//! The document layout matches what earlier clients persisted: most keys are
//! snake_case, but `downloadQuality`, `saveLocation` and `customLocation` are
//! camelCase on disk.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::platform::Platform;

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Preferred download quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Highest,
    Medium,
    Lowest,
}

/// Where downloads are saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveLocation {
    #[default]
    Default,
    Custom,
}

macro_rules! lowercase_enum_text {
    ($ty:ident, $what:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($text => Ok($ty::$variant),)+
                    _ => Err(format!("Unknown {}: {}", $what, s)),
                }
            }
        }
    };
}

lowercase_enum_text!(Theme, "theme", { Light => "light", Dark => "dark" });
lowercase_enum_text!(Quality, "quality", { Highest => "highest", Medium => "medium", Lowest => "lowest" });
lowercase_enum_text!(SaveLocation, "save location", { Default => "default", Custom => "custom" });

/// Persisted user preferences.
///
/// Missing keys in a stored document are filled from [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    #[serde(rename = "downloadQuality")]
    pub download_quality: Quality,
    #[serde(rename = "saveLocation")]
    pub save_location: SaveLocation,
    #[serde(rename = "customLocation")]
    pub custom_location: String,
    pub wifi_only: bool,
    pub notifications: bool,
    pub auto_detect_platform: bool,
    pub preview_media: bool,
    pub keep_screen_on: bool,
    pub max_concurrent_downloads: u32,
    pub max_history_items: u32,
    pub consent_adult_content: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            download_quality: Quality::Highest,
            save_location: SaveLocation::Default,
            custom_location: String::new(),
            wifi_only: false,
            notifications: true,
            auto_detect_platform: true,
            preview_media: true,
            keep_screen_on: true,
            max_concurrent_downloads: 1,
            max_history_items: 100,
            consent_adult_content: false,
        }
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    #[serde(rename = "downloadQuality")]
    pub download_quality: Option<Quality>,
    #[serde(rename = "saveLocation")]
    pub save_location: Option<SaveLocation>,
    #[serde(rename = "customLocation")]
    pub custom_location: Option<String>,
    pub wifi_only: Option<bool>,
    pub notifications: Option<bool>,
    pub auto_detect_platform: Option<bool>,
    pub preview_media: Option<bool>,
    pub keep_screen_on: Option<bool>,
    pub max_concurrent_downloads: Option<u32>,
    pub max_history_items: Option<u32>,
    pub consent_adult_content: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == SettingsPatch::default()
    }
}

impl Settings {
    /// Merge a patch, returning the combined settings.
    pub fn merged(&self, patch: &SettingsPatch) -> Settings {
        let mut next = self.clone();

        macro_rules! apply {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(value) = &patch.$field {
                    next.$field = value.clone();
                })+
            };
        }

        apply!(
            theme,
            download_quality,
            save_location,
            custom_location,
            wifi_only,
            notifications,
            auto_detect_platform,
            preview_media,
            keep_screen_on,
            max_concurrent_downloads,
            max_history_items,
            consent_adult_content,
        );

        next
    }

    /// Resolver hint for a request. With auto-detection off the caller must
    /// name a platform.
    pub fn platform_hint(&self, explicit: Option<Platform>) -> Result<Option<Platform>> {
        match explicit {
            Some(platform) => Ok(Some(platform)),
            None if self.auto_detect_platform => Ok(None),
            None => Err(Error::Precondition(
                "Platform auto-detection is disabled; pass --platform".to_string(),
            )),
        }
    }
}
