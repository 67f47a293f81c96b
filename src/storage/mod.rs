//! Key-value persistence for the settings and history documents.
//!
//! Each document is a JSON string stored under a single well-known key.
//! Writers replace the whole document; there is no multi-writer
//! transaction discipline, so concurrent writers race and the last one wins.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

/// Key of the persisted settings document.
pub const SETTINGS_KEY: &str = "social_saver_settings";

/// Key of the persisted download history document.
pub const HISTORY_KEY: &str = "social_saver_download_history";

/// Minimal string key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Outcome of reading a JSON document.
#[derive(Debug)]
pub enum Document<T> {
    Missing,
    Present(T),
    /// Stored text that does not parse as `T`.
    Corrupt(serde_json::Error),
}

/// Read and decode a JSON document. I/O failures are errors; bad JSON is not.
pub async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Document<T>> {
    let Some(raw) = store.get(key).await? else {
        return Ok(Document::Missing);
    };

    Ok(match serde_json::from_str(&raw) {
        Ok(value) => Document::Present(value),
        Err(e) => Document::Corrupt(e),
    })
}

/// Encode and write a JSON document.
pub async fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value).map_err(Error::storage)?;
    store.set(key, &raw).await
}
