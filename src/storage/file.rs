//! File-backed key-value store: one JSON file per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::storage::KeyValueStore;

/// Stores each key as `{dir}/{key}.json`, replaced atomically on write.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path backing a key. Keys are restricted to `[A-Za-z0-9_-]`.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Storage(format!("Invalid storage key: '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let temp = path.with_extension("json.tmp");

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Error::Storage(format!("Failed to create {}: {}", self.dir.display(), e)))?;

        tracing::debug!("Writing {} bytes to {}", value.len(), path.display());

        tokio::fs::write(&temp, value)
            .await
            .map_err(|e| Error::Storage(format!("Failed to write {}: {}", temp.display(), e)))?;

        if let Err(e) = tokio::fs::rename(&temp, &path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(Error::Storage(format!(
                "Failed to replace {}: {}",
                path.display(),
                e
            )));
        }

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(tmp.path().join("data"));

        assert_eq!(store.get("social_saver_settings").await.unwrap(), None);

        store.set("social_saver_settings", "{\"theme\":\"dark\"}").await.unwrap();
        assert_eq!(
            store.get("social_saver_settings").await.unwrap().as_deref(),
            Some("{\"theme\":\"dark\"}")
        );
        assert!(tmp.path().join("data/social_saver_settings.json").is_file());
        assert!(!tmp.path().join("data/social_saver_settings.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(tmp.path());

        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let tmp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(tmp.path());

        assert!(matches!(
            store.set("../escape", "x").await,
            Err(Error::Storage(_))
        ));
        assert!(matches!(store.get("").await, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn test_unreadable_location_is_storage_error() {
        let tmp = TempDir::new().unwrap();
        // A file where the directory should be.
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let store = FileKeyValueStore::new(&blocker);

        assert!(matches!(store.set("k", "v").await, Err(Error::Storage(_))));
    }
}
