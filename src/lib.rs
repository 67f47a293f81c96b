//! SocialSaver - download lifecycle core for a social media saver
//!
//! This library resolves Instagram, YouTube and Twitter links into media
//! info, saves the media through a platform-specific persistence adapter,
//! and keeps a capped download history and user settings.
//!
//! # Features
//!
//! - Platform detection and per-platform media classification
//! - Pluggable media info resolvers (placeholder or HTTP backend)
//! - Native and web file persistence with cancellable progress
//! - Download session state machine with lifecycle notifications
//! - Persisted settings and download history
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use social_saver::{App, Config, NullNotifier, Quality};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = App::build(Config::default()).await?;
//!     let orchestrator = app.orchestrator(Arc::new(NullNotifier));
//!
//!     orchestrator.request_info("youtube.com/watch?v=abc", None).await?;
//!     let record = orchestrator.start_download(Quality::Highest, "mp4").await?;
//!     println!("saved {:?}", record.file_path);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod history;
pub mod media;
pub mod notify;
pub mod output;
pub mod platform;
pub mod settings;
pub mod storage;

// Re-exports for convenience
pub use app::App;
pub use config::{Config, PersistenceMode};
pub use download::{DownloadOrchestrator, DownloadSession, SessionStatus};
pub use error::{Error, Result};
pub use history::{DownloadRecord, HistoryFilter, HistoryStore, RecordStatus, TimeRange};
pub use media::{MediaInfo, MediaResolver, MediaType};
pub use notify::{Notification, NotificationEvent, Notifier, NullNotifier};
pub use platform::{detect, Platform};
pub use settings::{Quality, Settings, SettingsPatch, SettingsStore};
