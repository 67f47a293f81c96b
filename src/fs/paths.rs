//! Path and directory management.

use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};

use crate::error::Result;
use crate::media::MediaType;

/// Name of the download root folder.
pub const ROOT_FOLDER_NAME: &str = "SocialSaver";

/// Folder tree for native downloads: `root/Video`, `root/Audio`, `root/Image`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFolders {
    root: PathBuf,
}

impl MediaFolders {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder a media type is saved into.
    pub fn folder_for(&self, media_type: MediaType) -> PathBuf {
        self.root.join(media_type.folder_name())
    }

    /// Ensure the folder for a media type exists, creating it on first use.
    pub async fn ensure_folder(&self, media_type: MediaType) -> Result<PathBuf> {
        let folder = self.folder_for(media_type);
        if !tokio::fs::try_exists(&folder).await.unwrap_or(false) {
            tracing::debug!("Creating download folder {}", folder.display());
            tokio::fs::create_dir_all(&folder).await?;
        }
        Ok(folder)
    }
}

/// Default root for native downloads: `<Downloads>/SocialSaver`.
///
/// Falls back to the application data directory, then to the working directory.
pub fn default_download_root() -> PathBuf {
    if let Some(dir) = UserDirs::new().and_then(|u| u.download_dir().map(Path::to_path_buf)) {
        return dir.join(ROOT_FOLDER_NAME);
    }
    default_data_dir().join(ROOT_FOLDER_NAME)
}

/// Default directory for persisted settings and history documents.
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", ROOT_FOLDER_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_for() {
        let folders = MediaFolders::new("/downloads/SocialSaver");
        assert_eq!(
            folders.folder_for(MediaType::Video),
            PathBuf::from("/downloads/SocialSaver/Video")
        );
        assert_eq!(
            folders.folder_for(MediaType::Photo),
            PathBuf::from("/downloads/SocialSaver/Image")
        );
        assert_eq!(
            folders.folder_for(MediaType::Audio),
            PathBuf::from("/downloads/SocialSaver/Audio")
        );
    }

    #[tokio::test]
    async fn test_folders_are_created_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let folders = MediaFolders::new(dir.path().join("SocialSaver"));

        assert!(!folders.root().exists());

        let audio = folders.ensure_folder(MediaType::Audio).await.unwrap();
        assert!(audio.is_dir());
        assert!(!folders.folder_for(MediaType::Video).exists());

        // Second call is a no-op.
        folders.ensure_folder(MediaType::Audio).await.unwrap();
    }

    #[test]
    fn test_default_root_ends_with_app_folder() {
        assert!(default_download_root().ends_with(ROOT_FOLDER_NAME));
    }
}
