//! Error types for the social-saver application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Download lifecycle errors
    #[error("Could not resolve media: {0}")]
    Resolution(String),

    #[error("Failed to save file: {0}")]
    Persistence(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Precondition(String),

    #[error("Download cancelled")]
    Cancelled,

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap any displayable failure as a storage error.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Error::Storage(err.to_string())
    }

    /// Wrap any displayable failure as a persistence error.
    pub fn persistence(err: impl std::fmt::Display) -> Self {
        Error::Persistence(err.to_string())
    }

    /// Whether this error is a rejected precondition rather than a failed operation.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Precondition(_))
    }
}

/// Process exit codes used by the CLI.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 2;
    pub const RESOLUTION_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const STORAGE_ERROR: i32 = 5;
    pub const UNEXPECTED_ERROR: i32 = 6;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_message_is_bare() {
        let err = Error::Precondition("A download is already in progress".into());
        assert_eq!(err.to_string(), "A download is already in progress");
        assert!(err.is_precondition());
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_helper_constructors() {
        assert!(matches!(Error::storage("disk full"), Error::Storage(m) if m == "disk full"));
        assert!(matches!(Error::persistence("reset"), Error::Persistence(m) if m == "reset"));
    }
}
