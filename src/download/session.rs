//! Download session state.

use serde::Serialize;
use std::fmt;

use crate::media::MediaInfo;

/// Lifecycle phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Resolving,
    Downloading,
    Succeeded,
    Failed,
}

impl SessionStatus {
    /// Whether an operation is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionStatus::Resolving | SessionStatus::Downloading)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Idle => write!(f, "idle"),
            SessionStatus::Resolving => write!(f, "resolving"),
            SessionStatus::Downloading => write!(f, "downloading"),
            SessionStatus::Succeeded => write!(f, "succeeded"),
            SessionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Snapshot of one resolve-and-download cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadSession {
    pub status: SessionStatus,
    /// Completion fraction in `[0, 1]`.
    pub progress: f64,
    pub media_info: Option<MediaInfo>,
    pub error: Option<String>,
}

impl DownloadSession {
    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    pub(crate) fn resolving() -> Self {
        Self {
            status: SessionStatus::Resolving,
            ..Self::default()
        }
    }
}
