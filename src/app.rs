//! Service wiring.
//!
//! Every long-lived service is built once from the [`Config`] and shared by
//! `Arc`. Nothing is global; consumers receive the services they need.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{validate_config, Config, PersistenceMode};
use crate::download::DownloadOrchestrator;
use crate::error::Result;
use crate::fs::{
    default_download_root, FilePersistence, LoggingSaveTrigger, NativePersistence, WebPersistence,
};
use crate::history::HistoryStore;
use crate::media::{MediaResolver, PlaceholderResolver, RemoteResolver};
use crate::notify::Notifier;
use crate::settings::{SaveLocation, Settings, SettingsPatch, SettingsStore};
use crate::storage::{FileKeyValueStore, KeyValueStore};

/// The assembled service graph.
pub struct App {
    pub config: Config,
    pub settings: Arc<SettingsStore>,
    pub history: Arc<HistoryStore>,
    pub resolver: Arc<dyn MediaResolver>,
    pub persistence: Arc<dyn FilePersistence>,
}

impl App {
    /// Build services backed by files under the configured data directory.
    pub async fn build(config: Config) -> Result<Self> {
        let data_dir = config.data_directory();
        tracing::debug!("Using data directory {}", data_dir.display());
        Self::with_storage(config, Arc::new(FileKeyValueStore::new(data_dir))).await
    }

    /// Build services on top of an existing key-value store.
    pub async fn with_storage(config: Config, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        validate_config(&config)?;

        let settings = Arc::new(SettingsStore::new(storage.clone()));
        let current = settings.load().await;

        let history = Arc::new(HistoryStore::new(
            storage,
            current.max_history_items as usize,
        ));

        let resolver: Arc<dyn MediaResolver> = match &config.resolver.endpoint {
            Some(endpoint) => {
                tracing::debug!("Resolving media through {}", endpoint);
                Arc::new(RemoteResolver::new(endpoint, config.resolver_timeout())?)
            }
            None => Arc::new(PlaceholderResolver::new()),
        };

        let persistence: Arc<dyn FilePersistence> = match config.downloads.persistence {
            PersistenceMode::Native => {
                let root = download_root(&config, &current);
                tracing::debug!("Saving downloads under {}", root.display());
                Arc::new(NativePersistence::new(root)?)
            }
            PersistenceMode::Web => Arc::new(WebPersistence::new(
                Arc::new(LoggingSaveTrigger),
                config.web.progress_steps,
                config.web_tick(),
            )),
        };

        Ok(Self {
            config,
            settings,
            history,
            resolver,
            persistence,
        })
    }

    /// A fresh orchestrator sharing this app's services.
    pub fn orchestrator(&self, notifier: Arc<dyn Notifier>) -> DownloadOrchestrator {
        DownloadOrchestrator::new(
            self.resolver.clone(),
            self.persistence.clone(),
            self.history.clone(),
            notifier,
        )
        .with_settings(self.settings.clone())
    }

    /// Save a settings patch and apply the history cap it carries.
    pub async fn save_settings(&self, patch: &SettingsPatch) -> Result<Settings> {
        let saved = self.settings.save(patch).await?;
        self.history.set_capacity(saved.max_history_items as usize);
        Ok(saved)
    }

    /// Restore default settings, including the default history cap.
    pub async fn reset_settings(&self) -> Result<Settings> {
        let defaults = self.settings.reset().await?;
        self.history.set_capacity(defaults.max_history_items as usize);
        Ok(defaults)
    }
}

/// Config directory first, then the user's custom location, then the default.
fn download_root(config: &Config, settings: &Settings) -> PathBuf {
    if let Some(dir) = &config.downloads.directory {
        return dir.clone();
    }
    if settings.save_location == SaveLocation::Custom && !settings.custom_location.trim().is_empty()
    {
        return PathBuf::from(settings.custom_location.trim());
    }
    default_download_root()
}
