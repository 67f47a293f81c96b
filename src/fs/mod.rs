//! Filesystem module.
//!
//! Provides:
//! - The file persistence adapter trait and its web/native variants
//! - Download folder layout
//! - Filename generation and sanitization

pub mod adapter;
pub mod naming;
pub mod native;
pub mod paths;
pub mod web;

pub use adapter::{DownloadOutcome, FilePersistence};
pub use naming::{build_file_name, make_unique_filename, sanitize_file_name, validate_format};
pub use native::NativePersistence;
pub use paths::{default_data_dir, default_download_root, MediaFolders};
pub use web::{LoggingSaveTrigger, SaveRequest, SaveTrigger, WebPersistence};
