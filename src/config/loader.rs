//! Configuration structures and loading logic.

use crate::config::modes::PersistenceMode;
use crate::error::{Error, Result};
use crate::fs::{default_data_dir, default_download_root};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub downloads: DownloadsConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub web: WebConfig,
}

/// Where settings and history documents are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the key-value documents.
    #[serde(default)]
    pub data_directory: Option<PathBuf>,
}

/// Download destination configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadsConfig {
    /// Root of the native folder tree.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Persistence adapter (native, web).
    #[serde(default)]
    pub persistence: PersistenceMode,
}

/// Media info resolver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Backend base URL. The placeholder resolver is used when absent.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Request timeout for the backend.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Synthetic progress for the web adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_progress_steps")]
    pub progress_steps: u32,

    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            progress_steps: default_progress_steps(),
            tick_millis: default_tick_millis(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_progress_steps() -> u32 {
    10
}

fn default_tick_millis() -> u64 {
    300
}

/// Default location of `config.toml`.
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", "SocialSaver")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Effective directory for key-value documents.
    pub fn data_directory(&self) -> PathBuf {
        self.storage
            .data_directory
            .clone()
            .unwrap_or_else(default_data_dir)
    }

    /// Effective root of the native download tree.
    pub fn download_directory(&self) -> PathBuf {
        self.downloads
            .directory
            .clone()
            .unwrap_or_else(default_download_root)
    }

    pub fn resolver_timeout(&self) -> Duration {
        Duration::from_secs(self.resolver.timeout_seconds)
    }

    pub fn web_tick(&self) -> Duration {
        Duration::from_millis(self.web.tick_millis)
    }
}
