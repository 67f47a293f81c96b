//! File persistence adapter interface.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::PersistenceMode;
use crate::download::progress::ProgressReporter;
use crate::error::Result;
use crate::media::MediaType;

/// Where a finished transfer ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadOutcome {
    pub file_path: PathBuf,
    /// Size in bytes, when the adapter can know it.
    pub file_size: Option<u64>,
}

/// Writes a downloaded blob to its destination.
///
/// Implementations report progress through the given reporter, finishing
/// with exactly 1.0 on success, and stop with [`Error::Cancelled`] when the
/// reporter's token is cancelled.
///
/// [`Error::Cancelled`]: crate::error::Error::Cancelled
#[async_trait]
pub trait FilePersistence: Send + Sync {
    /// Which host environment this adapter serves.
    fn mode(&self) -> PersistenceMode;

    /// Save `source` as `file_name`, sorted by `media_type`.
    async fn download(
        &self,
        source: &str,
        file_name: &str,
        media_type: MediaType,
        progress: ProgressReporter,
    ) -> Result<DownloadOutcome>;
}
