//! Configuration module for social-saver.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Persistence mode selection
//! - Configuration and settings validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{
    default_config_path, Config, DownloadsConfig, ResolverConfig, StorageConfig, WebConfig,
};
pub use modes::PersistenceMode;
pub use validation::{validate_config, validate_settings};
