//! Download module.
//!
//! This module provides:
//! - The download session and its lifecycle states
//! - The orchestrator driving resolve and download requests
//! - The cancellable progress channel shared with persistence adapters

pub mod orchestrator;
pub mod progress;
pub mod session;

pub use orchestrator::DownloadOrchestrator;
pub use progress::{progress_channel, ProgressReceiver, ProgressReporter};
pub use session::{DownloadSession, SessionStatus};
