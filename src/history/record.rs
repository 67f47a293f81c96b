//! Download history records.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fs::DownloadOutcome;
use crate::media::{MediaInfo, MediaType};
use crate::platform::Platform;
use crate::settings::Quality;

/// How a download attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Completed,
    Failed,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStatus::Completed => write!(f, "completed"),
            RecordStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One finished download attempt. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRecord {
    pub id: String,
    pub source_url: String,
    pub platform: Platform,
    pub media_type: MediaType,
    #[serde(default)]
    pub title: String,
    /// Absent for failed attempts.
    #[serde(default)]
    pub file_path: Option<PathBuf>,
    #[serde(default)]
    pub file_size: Option<u64>,
    pub quality: Quality,
    pub format: String,
    pub created_at: DateTime<Utc>,
    pub status: RecordStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DownloadRecord {
    fn base(info: &MediaInfo, quality: Quality, format: &str, status: RecordStatus) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source_url: info.source_url.clone(),
            platform: info.platform,
            media_type: info.media_type,
            title: info.title.clone(),
            file_path: None,
            file_size: None,
            quality,
            format: format.to_string(),
            created_at: Utc::now(),
            status,
            error: None,
        }
    }

    /// Record for a transfer that finished.
    pub fn completed(
        info: &MediaInfo,
        outcome: &DownloadOutcome,
        quality: Quality,
        format: &str,
    ) -> Self {
        Self {
            file_path: Some(outcome.file_path.clone()),
            file_size: outcome.file_size,
            ..Self::base(info, quality, format, RecordStatus::Completed)
        }
    }

    /// Record for a transfer that failed with `error`.
    pub fn failed(info: &MediaInfo, quality: Quality, format: &str, error: &str) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::base(info, quality, format, RecordStatus::Failed)
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == RecordStatus::Completed
    }
}
