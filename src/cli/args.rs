//! Command-line argument definitions using clap.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, PersistenceMode};
use crate::history::{HistoryFilter, TimeRange};
use crate::media::MediaType;
use crate::platform::Platform;
use crate::settings::{Quality, SaveLocation, SettingsPatch, Theme};

/// SocialSaver media downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "socialsaver",
    version,
    about = "Save media from Instagram, YouTube and Twitter",
    long_about = "Resolve social media links, download them into a sorted folder tree \
                  and keep a history of what was saved.\n\n\
                  Settings and history persist between runs."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "SOCIALSAVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for settings and history documents.
    #[arg(long = "data-dir", env = "SOCIALSAVER_DATA_DIR")]
    pub data_directory: Option<PathBuf>,

    /// Root directory for downloads.
    #[arg(short = 'd', long = "download-dir")]
    pub download_directory: Option<PathBuf>,

    /// File persistence adapter.
    #[arg(long, value_enum)]
    pub persistence: Option<PersistenceArg>,

    /// Media info backend base URL.
    #[arg(long, env = "SOCIALSAVER_RESOLVER")]
    pub resolver: Option<String>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a URL and show its media info.
    Info {
        url: String,

        /// Platform to assume instead of detecting it.
        #[arg(short, long, value_enum, default_value_t = PlatformArg::Auto)]
        platform: PlatformArg,
    },

    /// Resolve a URL and download it.
    Download {
        url: String,

        /// Platform to assume instead of detecting it.
        #[arg(short, long, value_enum, default_value_t = PlatformArg::Auto)]
        platform: PlatformArg,

        /// Quality preference (defaults to the saved setting).
        #[arg(short, long, value_enum)]
        quality: Option<QualityArg>,

        /// File extension (defaults to mp4, jpg or mp3 by media type).
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Show or edit download history.
    #[command(args_conflicts_with_subcommands = true)]
    History {
        #[command(subcommand)]
        action: Option<HistoryCommand>,

        #[command(flatten)]
        list: HistoryListArgs,
    },

    /// Show or edit settings.
    Settings {
        #[command(subcommand)]
        action: Option<SettingsCommand>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List downloads, most recent first.
    List(HistoryListArgs),
    /// Delete one record by ID.
    Remove { id: String },
    /// Delete every record.
    Clear,
    /// Show download statistics.
    Stats,
}

#[derive(ClapArgs, Debug, Default, Clone)]
pub struct HistoryListArgs {
    /// Maximum number of records to show.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Only this platform.
    #[arg(short, long, value_enum)]
    pub platform: Option<PlatformArg>,

    /// Only this media type.
    #[arg(short = 't', long = "type", value_enum)]
    pub media_type: Option<MediaTypeArg>,

    /// Only records newer than this.
    #[arg(short, long, value_enum, default_value_t = TimeRangeArg::All)]
    pub since: TimeRangeArg,
}

impl HistoryListArgs {
    pub fn filter(&self) -> HistoryFilter {
        HistoryFilter {
            platform: self.platform.and_then(PlatformArg::hint),
            media_type: self.media_type.map(Into::into),
            time_range: self.since.into(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print current settings.
    Show,
    /// Change one or more settings.
    Set(SettingsSetArgs),
    /// Restore defaults.
    Reset,
    /// Switch between light and dark theme.
    ToggleTheme,
}

#[derive(ClapArgs, Debug, Default)]
pub struct SettingsSetArgs {
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    #[arg(long, value_enum)]
    pub quality: Option<QualityArg>,

    #[arg(long, value_enum)]
    pub save_location: Option<SaveLocationArg>,

    #[arg(long)]
    pub custom_location: Option<String>,

    #[arg(long)]
    pub wifi_only: Option<bool>,

    #[arg(long)]
    pub notifications: Option<bool>,

    #[arg(long)]
    pub auto_detect_platform: Option<bool>,

    #[arg(long)]
    pub preview_media: Option<bool>,

    #[arg(long)]
    pub keep_screen_on: Option<bool>,

    #[arg(long)]
    pub max_concurrent_downloads: Option<u32>,

    #[arg(long)]
    pub max_history_items: Option<u32>,

    #[arg(long)]
    pub consent_adult_content: Option<bool>,
}

impl SettingsSetArgs {
    pub fn into_patch(self) -> SettingsPatch {
        SettingsPatch {
            theme: self.theme.map(Into::into),
            download_quality: self.quality.map(Into::into),
            save_location: self.save_location.map(Into::into),
            custom_location: self.custom_location,
            wifi_only: self.wifi_only,
            notifications: self.notifications,
            auto_detect_platform: self.auto_detect_platform,
            preview_media: self.preview_media,
            keep_screen_on: self.keep_screen_on,
            max_concurrent_downloads: self.max_concurrent_downloads,
            max_history_items: self.max_history_items,
            consent_adult_content: self.consent_adult_content,
        }
    }
}

/// CLI persistence mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PersistenceArg {
    /// Write into the local folder tree.
    Native,
    /// Hand saves to a browser host.
    Web,
}

impl From<PersistenceArg> for PersistenceMode {
    fn from(arg: PersistenceArg) -> Self {
        match arg {
            PersistenceArg::Native => PersistenceMode::Native,
            PersistenceArg::Web => PersistenceMode::Web,
        }
    }
}

/// CLI platform argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    /// Detect from the URL.
    Auto,
    Instagram,
    Youtube,
    Twitter,
}

impl PlatformArg {
    /// Platform hint for the resolver; `None` means detect.
    pub fn hint(self) -> Option<Platform> {
        match self {
            PlatformArg::Auto => None,
            PlatformArg::Instagram => Some(Platform::Instagram),
            PlatformArg::Youtube => Some(Platform::YouTube),
            PlatformArg::Twitter => Some(Platform::Twitter),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum QualityArg {
    Highest,
    Medium,
    Lowest,
}

impl From<QualityArg> for Quality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::Highest => Quality::Highest,
            QualityArg::Medium => Quality::Medium,
            QualityArg::Lowest => Quality::Lowest,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SaveLocationArg {
    Default,
    Custom,
}

impl From<SaveLocationArg> for SaveLocation {
    fn from(arg: SaveLocationArg) -> Self {
        match arg {
            SaveLocationArg::Default => SaveLocation::Default,
            SaveLocationArg::Custom => SaveLocation::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MediaTypeArg {
    Video,
    Photo,
    Audio,
}

impl From<MediaTypeArg> for MediaType {
    fn from(arg: MediaTypeArg) -> Self {
        match arg {
            MediaTypeArg::Video => MediaType::Video,
            MediaTypeArg::Photo => MediaType::Photo,
            MediaTypeArg::Audio => MediaType::Audio,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum TimeRangeArg {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl From<TimeRangeArg> for TimeRange {
    fn from(arg: TimeRangeArg) -> Self {
        match arg {
            TimeRangeArg::All => TimeRange::All,
            TimeRangeArg::Today => TimeRange::Today,
            TimeRangeArg::Week => TimeRange::Week,
            TimeRangeArg::Month => TimeRange::Month,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(dir) = &self.data_directory {
            config.storage.data_directory = Some(dir.clone());
        }

        if let Some(dir) = &self.download_directory {
            config.downloads.directory = Some(dir.clone());
        }

        if let Some(mode) = self.persistence {
            config.downloads.persistence = mode.into();
        }

        if let Some(endpoint) = &self.resolver {
            config.resolver.endpoint = Some(endpoint.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_download_args() {
        let args = Args::try_parse_from([
            "socialsaver",
            "--persistence",
            "web",
            "download",
            "youtube.com/watch?v=abc",
            "--quality",
            "medium",
            "--format",
            "webm",
        ])
        .unwrap();

        let mut config = Config::default();
        args.merge_into_config(&mut config);
        assert_eq!(config.downloads.persistence, PersistenceMode::Web);

        match args.command {
            Command::Download {
                url,
                platform,
                quality,
                format,
            } => {
                assert_eq!(url, "youtube.com/watch?v=abc");
                assert_eq!(platform, PlatformArg::Auto);
                assert!(matches!(quality, Some(QualityArg::Medium)));
                assert_eq!(format.as_deref(), Some("webm"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_history_defaults_to_listing() {
        let args = Args::try_parse_from([
            "socialsaver",
            "history",
            "--platform",
            "instagram",
            "--since",
            "week",
        ])
        .unwrap();

        match args.command {
            Command::History { action: None, list } => {
                let filter = list.filter();
                assert_eq!(filter.platform, Some(Platform::Instagram));
                assert_eq!(filter.time_range, TimeRange::Week);
                assert_eq!(filter.media_type, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_history_remove() {
        let args = Args::try_parse_from(["socialsaver", "history", "remove", "abc"]).unwrap();
        assert!(matches!(
            args.command,
            Command::History {
                action: Some(HistoryCommand::Remove { ref id }),
                ..
            } if id == "abc"
        ));
    }

    #[test]
    fn test_settings_set_builds_patch() {
        let args = Args::try_parse_from([
            "socialsaver",
            "settings",
            "set",
            "--theme",
            "dark",
            "--wifi-only",
            "true",
            "--max-history-items",
            "50",
        ])
        .unwrap();

        let Command::Settings {
            action: Some(SettingsCommand::Set(set)),
        } = args.command
        else {
            panic!("expected settings set");
        };
        let patch = set.into_patch();
        assert_eq!(patch.theme, Some(Theme::Dark));
        assert_eq!(patch.wifi_only, Some(true));
        assert_eq!(patch.max_history_items, Some(50));
        assert_eq!(patch.notifications, None);
    }

    #[test]
    fn test_platform_hint() {
        assert_eq!(PlatformArg::Auto.hint(), None);
        assert_eq!(PlatformArg::Youtube.hint(), Some(Platform::YouTube));
    }
}
