//! Filename generation and manipulation.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name used when sanitizing leaves nothing behind.
const FALLBACK_NAME: &str = "download";

/// Longest file name we will produce, in characters.
const MAX_NAME_CHARS: usize = 200;

/// Sanitize a file name for use as a single path segment.
///
/// Anything other than word characters, spaces and dots is replaced with an
/// underscore. Leading dots are stripped so the result can never be `.`,
/// `..` or a hidden file. Names that end up empty become `download`.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            c if c.is_alphanumeric() || c == '_' || c == '.' || c == ' ' => c,
            _ => '_',
        })
        .collect();

    let trimmed = replaced.trim().trim_start_matches('.').trim();
    if trimmed.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    trimmed.chars().take(MAX_NAME_CHARS).collect()
}

/// Validate a format/extension string chosen by the user.
pub fn validate_format(format: &str) -> Result<&str> {
    let format = format.trim().trim_start_matches('.');
    if format.is_empty() || format.len() > 8 || !format.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(Error::InvalidFilename(format!(
            "Invalid file format: '{}'",
            format
        )));
    }
    Ok(format)
}

/// Build the destination name `{title}_{millis}.{format}`, sanitized.
pub fn build_file_name(title: &str, timestamp_millis: i64, format: &str) -> String {
    let title = if title.trim().is_empty() {
        FALLBACK_NAME
    } else {
        title
    };
    sanitize_file_name(&format!("{}_{}.{}", title, timestamp_millis, format))
}

/// Generate a unique filename by appending a number if the file exists.
pub fn make_unique_filename(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new("."));

    let mut counter = 1;
    loop {
        let new_name = if ext.is_empty() {
            format!("{}_{}", stem, counter)
        } else {
            format!("{}_{}.{}", stem, counter, ext)
        };

        let new_path = parent.join(&new_name);
        if !new_path.exists() {
            return new_path;
        }

        counter += 1;
        if counter > 1000 {
            // Safety limit
            return new_path;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_non_word_characters() {
        assert_eq!(sanitize_file_name("normal.mp4"), "normal.mp4");
        assert_eq!(sanitize_file_name("file:name?.mp4"), "file_name_.mp4");
        assert_eq!(
            sanitize_file_name("YouTube Video_1700000000000.mp4"),
            "YouTube Video_1700000000000.mp4"
        );
    }

    #[test]
    fn test_sanitize_blocks_path_traversal() {
        assert_eq!(sanitize_file_name("../etc/passwd"), "_etc_passwd");
        assert_eq!(sanitize_file_name("..\\windows"), "_windows");
        assert_eq!(sanitize_file_name("a/b/c.jpg"), "a_b_c.jpg");
        assert_eq!(sanitize_file_name(".."), "download");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
    }

    #[test]
    fn test_sanitize_empty_and_control() {
        assert_eq!(sanitize_file_name(""), "download");
        assert_eq!(sanitize_file_name("   "), "download");
        assert_eq!(sanitize_file_name("a\0b\nc"), "a_b_c");
    }

    #[test]
    fn test_sanitize_truncates() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_file_name(&long).chars().count(), 200);
    }

    #[test]
    fn test_build_file_name() {
        assert_eq!(
            build_file_name("Twitter Photo", 1700000000000, "jpg"),
            "Twitter Photo_1700000000000.jpg"
        );
        assert_eq!(build_file_name("", 5, "mp4"), "download_5.mp4");
        assert_eq!(build_file_name("a/b", 5, "mp4"), "a_b_5.mp4");
    }

    #[test]
    fn test_validate_format() {
        assert_eq!(validate_format("mp4").unwrap(), "mp4");
        assert_eq!(validate_format(".jpg").unwrap(), "jpg");
        assert!(validate_format("").is_err());
        assert!(validate_format("mp4/../x").is_err());
    }

    #[test]
    fn test_make_unique_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        assert_eq!(make_unique_filename(&path), path);

        std::fs::write(&path, b"x").unwrap();
        assert_eq!(make_unique_filename(&path), dir.path().join("clip_1.mp4"));
    }
}
