//! Web file persistence: hands the save to the browser.
//!
//! The browser owns the actual transfer, so no byte progress is available.
//! Progress is interpolated over a fixed number of ticks before the save is
//! triggered.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::PersistenceMode;
use crate::download::progress::ProgressReporter;
use crate::error::{Error, Result};
use crate::fs::adapter::{DownloadOutcome, FilePersistence};
use crate::fs::naming::sanitize_file_name;
use crate::media::{normalize_url, MediaType};

/// A browser-level "save as" request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub url: String,
    pub file_name: String,
    pub mime_type: String,
}

/// Host hook that performs the browser save.
pub trait SaveTrigger: Send + Sync {
    fn save(&self, request: &SaveRequest) -> Result<()>;
}

/// Trigger that only records the request in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSaveTrigger;

impl SaveTrigger for LoggingSaveTrigger {
    fn save(&self, request: &SaveRequest) -> Result<()> {
        tracing::info!(
            "Browser save requested: {} as {} ({})",
            request.url,
            request.file_name,
            request.mime_type
        );
        Ok(())
    }
}

/// Persistence adapter for browser hosts.
pub struct WebPersistence {
    trigger: Arc<dyn SaveTrigger>,
    steps: u32,
    tick: Duration,
}

impl WebPersistence {
    /// `steps` and `tick` are raised to at least 1 and 1ms.
    pub fn new(trigger: Arc<dyn SaveTrigger>, steps: u32, tick: Duration) -> Self {
        Self {
            trigger,
            steps: steps.max(1),
            tick: tick.max(Duration::from_millis(1)),
        }
    }
}

impl Default for WebPersistence {
    fn default() -> Self {
        Self::new(Arc::new(LoggingSaveTrigger), 10, Duration::from_millis(300))
    }
}

#[async_trait]
impl FilePersistence for WebPersistence {
    fn mode(&self) -> PersistenceMode {
        PersistenceMode::Web
    }

    async fn download(
        &self,
        source: &str,
        file_name: &str,
        _media_type: MediaType,
        mut progress: ProgressReporter,
    ) -> Result<DownloadOutcome> {
        let url = normalize_url(source).map_err(|e| Error::Persistence(e.to_string()))?;
        let file_name = sanitize_file_name(file_name);
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        progress.report(0.0)?;

        let cancel = progress.cancellation().clone();
        let mut ticker = tokio::time::interval(self.tick);
        ticker.tick().await;

        for step in 1..self.steps {
            tokio::select! {
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                _ = ticker.tick() => {}
            }
            progress.report(step as f64 / self.steps as f64)?;
        }

        progress.checkpoint()?;

        self.trigger
            .save(&SaveRequest {
                url,
                file_name: file_name.clone(),
                mime_type,
            })
            .map_err(|e| match e {
                Error::Persistence(_) => e,
                other => Error::persistence(other),
            })?;

        progress.finish()?;

        Ok(DownloadOutcome {
            file_path: PathBuf::from(file_name),
            file_size: None,
        })
    }
}
