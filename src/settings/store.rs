//! Persisted settings service.

use std::sync::Arc;

use crate::config::validate_settings;
use crate::error::Result;
use crate::settings::model::{Settings, SettingsPatch};
use crate::storage::{read_json, write_json, Document, KeyValueStore, SETTINGS_KEY};

/// Loads, patches and resets the single persisted [`Settings`] document.
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current settings.
    ///
    /// Defaults are persisted when nothing is stored yet. Read or parse
    /// failures fall back to defaults.
    pub async fn load(&self) -> Settings {
        match read_json::<Settings>(self.store.as_ref(), SETTINGS_KEY).await {
            Ok(Document::Present(settings)) => settings,
            Ok(Document::Missing) => {
                let defaults = Settings::default();
                if let Err(e) = write_json(self.store.as_ref(), SETTINGS_KEY, &defaults).await {
                    tracing::warn!("Could not persist default settings: {}", e);
                }
                defaults
            }
            Ok(Document::Corrupt(e)) => {
                tracing::warn!("Stored settings are unreadable, using defaults: {}", e);
                Settings::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read settings, using defaults: {}", e);
                Settings::default()
            }
        }
    }

    /// Persisted settings as a merge base. Read failures propagate; a
    /// missing or corrupt document yields defaults.
    async fn current(&self) -> Result<Settings> {
        match read_json::<Settings>(self.store.as_ref(), SETTINGS_KEY).await? {
            Document::Present(settings) => Ok(settings),
            Document::Missing => Ok(Settings::default()),
            Document::Corrupt(e) => {
                tracing::warn!("Replacing unreadable settings document: {}", e);
                Ok(Settings::default())
            }
        }
    }

    /// Merge `patch` onto the persisted settings, validate, persist and return.
    pub async fn save(&self, patch: &SettingsPatch) -> Result<Settings> {
        let current = self.current().await?;
        let next = current.merged(patch);
        validate_settings(&next)?;

        write_json(self.store.as_ref(), SETTINGS_KEY, &next).await?;
        tracing::debug!("Settings saved: {:?}", next);
        Ok(next)
    }

    /// Persist and return the defaults.
    pub async fn reset(&self) -> Result<Settings> {
        let defaults = Settings::default();
        write_json(self.store.as_ref(), SETTINGS_KEY, &defaults).await?;
        tracing::debug!("Settings reset to defaults");
        Ok(defaults)
    }

    /// Flip between light and dark.
    pub async fn toggle_theme(&self) -> Result<Settings> {
        let current = self.current().await?;
        self.save(&SettingsPatch {
            theme: Some(current.theme.toggled()),
            ..SettingsPatch::default()
        })
        .await
    }
}
