//! Native file persistence: writes into the `SocialSaver` folder tree.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use url::Url;

use crate::config::PersistenceMode;
use crate::download::progress::ProgressReporter;
use crate::error::{Error, Result};
use crate::fs::adapter::{DownloadOutcome, FilePersistence};
use crate::fs::naming::{make_unique_filename, sanitize_file_name};
use crate::fs::paths::MediaFolders;
use crate::media::MediaType;

/// Read size for local copies.
const CHUNK_SIZE: usize = 64 * 1024;

/// Persistence adapter for hosts with a real filesystem.
///
/// `http(s)` sources are streamed, `file` sources are copied. Data lands in a
/// `.part` file that is renamed into place only after the transfer completes.
pub struct NativePersistence {
    folders: MediaFolders,
    client: Client,
}

impl NativePersistence {
    /// Create an adapter rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("socialsaver/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(root, client))
    }

    pub fn with_client(root: impl Into<PathBuf>, client: Client) -> Self {
        Self {
            folders: MediaFolders::new(root),
            client,
        }
    }

    pub fn folders(&self) -> &MediaFolders {
        &self.folders
    }

    /// Stream an HTTP(S) source into `dest`, returning bytes written.
    async fn fetch_http(
        &self,
        url: Url,
        dest: &Path,
        progress: &mut ProgressReporter,
    ) -> Result<u64> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Persistence(format!("Request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| Error::Persistence(format!("Server refused download: {}", e)))?;

        let content_length = response.content_length();

        let mut file = File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Persistence(format!("Stream error: {}", e)))?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            match content_length {
                Some(total) => progress.report_bytes(downloaded, total)?,
                None => progress.checkpoint()?,
            }
        }

        file.flush().await?;

        if let Some(total) = content_length {
            if downloaded < total {
                return Err(Error::Persistence(format!(
                    "Connection closed after {} of {} bytes",
                    downloaded, total
                )));
            }
        }

        Ok(downloaded)
    }
}

/// Copy a `file://` source into `dest`, returning bytes written.
async fn copy_local(url: &Url, dest: &Path, progress: &mut ProgressReporter) -> Result<u64> {
    let path = url
        .to_file_path()
        .map_err(|_| Error::Persistence(format!("Invalid file URL: {}", url)))?;

    let mut source = File::open(&path)
        .await
        .map_err(|e| Error::Persistence(format!("Cannot open {}: {}", path.display(), e)))?;
    let total = source.metadata().await?.len();

    let mut file = File::create(dest).await?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut copied: u64 = 0;

    loop {
        let read = source.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        file.write_all(&buf[..read]).await?;
        copied += read as u64;
        progress.report_bytes(copied, total)?;
    }

    file.flush().await?;
    Ok(copied)
}

/// `clip.mp4` -> `clip.mp4.part`
fn part_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

#[async_trait]
impl FilePersistence for NativePersistence {
    fn mode(&self) -> PersistenceMode {
        PersistenceMode::Native
    }

    async fn download(
        &self,
        source: &str,
        file_name: &str,
        media_type: MediaType,
        mut progress: ProgressReporter,
    ) -> Result<DownloadOutcome> {
        let url = Url::parse(source)
            .map_err(|e| Error::Persistence(format!("Invalid source '{}': {}", source, e)))?;

        let folder = self
            .folders
            .ensure_folder(media_type)
            .await
            .map_err(Error::persistence)?;
        let output_path = make_unique_filename(&folder.join(sanitize_file_name(file_name)));
        let temp_path = part_path(&output_path);

        progress.report(0.0)?;

        let transfer = match url.scheme() {
            "http" | "https" => self.fetch_http(url.clone(), &temp_path, &mut progress).await,
            "file" => copy_local(&url, &temp_path, &mut progress).await,
            other => Err(Error::Persistence(format!(
                "Unsupported source scheme: {}",
                other
            ))),
        };

        let written = match transfer.and_then(|written| progress.finish().map(|_| written)) {
            Ok(written) => written,
            Err(e) => {
                let _ = tokio::fs::remove_file(&temp_path).await;
                return Err(match e {
                    Error::Cancelled | Error::Persistence(_) => e,
                    other => Error::persistence(other),
                });
            }
        };

        if let Err(e) = tokio::fs::rename(&temp_path, &output_path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(Error::Persistence(format!(
                "Failed to move download into place: {}",
                e
            )));
        }

        tracing::info!("Downloaded: {}", output_path.display());

        Ok(DownloadOutcome {
            file_path: output_path,
            file_size: Some(written),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::progress::{progress_channel, ProgressReceiver};
    use tokio::net::TcpListener;
    use tokio_util::sync::CancellationToken;

    async fn collect(mut rx: ProgressReceiver) -> Vec<f64> {
        let mut values = Vec::new();
        while let Some(v) = rx.recv().await {
            values.push(v);
        }
        values
    }

    fn file_url(path: &Path) -> String {
        Url::from_file_path(path).unwrap().to_string()
    }

    #[tokio::test]
    async fn test_copies_local_source_into_type_folder() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.bin");
        std::fs::write(&source, vec![7u8; 200 * 1024]).unwrap();

        let adapter = NativePersistence::new(dir.path().join("SocialSaver")).unwrap();
        let (reporter, rx) = progress_channel(CancellationToken::new());

        let outcome = adapter
            .download(&file_url(&source), "clip.mp4", MediaType::Video, reporter)
            .await
            .unwrap();

        assert_eq!(
            outcome.file_path,
            dir.path().join("SocialSaver").join("Video").join("clip.mp4")
        );
        assert_eq!(outcome.file_size, Some(200 * 1024));
        assert!(!part_path(&outcome.file_path).exists());

        let values = collect(rx).await;
        assert_eq!(values.first(), Some(&0.0));
        assert_eq!(values.last(), Some(&1.0));
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_never_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.jpg");
        std::fs::write(&source, b"jpeg").unwrap();
        let adapter = NativePersistence::new(dir.path().join("root")).unwrap();

        let (first, _rx1) = progress_channel(CancellationToken::new());
        let a = adapter
            .download(&file_url(&source), "pic.jpg", MediaType::Photo, first)
            .await
            .unwrap();
        let (second, _rx2) = progress_channel(CancellationToken::new());
        let b = adapter
            .download(&file_url(&source), "pic.jpg", MediaType::Photo, second)
            .await
            .unwrap();

        assert_ne!(a.file_path, b.file_path);
        assert!(b.file_path.ends_with("Image/pic_1.jpg"));
    }

    #[tokio::test]
    async fn test_sanitizes_destination_name() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.mp3");
        std::fs::write(&source, b"id3").unwrap();
        let adapter = NativePersistence::new(dir.path().join("root")).unwrap();

        let (reporter, _rx) = progress_channel(CancellationToken::new());
        let outcome = adapter
            .download(&file_url(&source), "../../evil.mp3", MediaType::Audio, reporter)
            .await
            .unwrap();

        assert_eq!(outcome.file_path.parent().unwrap(), dir.path().join("root/Audio"));
    }

    #[tokio::test]
    async fn test_missing_source_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = NativePersistence::new(dir.path().join("root")).unwrap();
        let (reporter, _rx) = progress_channel(CancellationToken::new());

        let err = adapter
            .download(
                &file_url(&dir.path().join("missing.mp4")),
                "clip.mp4",
                MediaType::Video,
                reporter,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Persistence(_)));
        let video = dir.path().join("root/Video");
        assert_eq!(std::fs::read_dir(video).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = NativePersistence::new(dir.path()).unwrap();
        let (reporter, _rx) = progress_channel(CancellationToken::new());

        let err = adapter
            .download("ftp://example.com/a.mp4", "a.mp4", MediaType::Video, reporter)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.mp4");
        std::fs::write(&source, b"data").unwrap();
        let adapter = NativePersistence::new(dir.path().join("root")).unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let (reporter, _rx) = progress_channel(token);

        let err = adapter
            .download(&file_url(&source), "a.mp4", MediaType::Video, reporter)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert!(!dir.path().join("root/Video/a.mp4").exists());
    }

    #[tokio::test]
    async fn test_streams_http_source() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let body = vec![1u8; 4096];
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.ok();
        });

        let dir = tempfile::tempdir().unwrap();
        let adapter = NativePersistence::new(dir.path()).unwrap();
        let (reporter, rx) = progress_channel(CancellationToken::new());

        let outcome = adapter
            .download(
                &format!("http://{}/clip.mp4", addr),
                "clip.mp4",
                MediaType::Video,
                reporter,
            )
            .await
            .unwrap();

        assert_eq!(outcome.file_size, Some(4096));
        assert_eq!(std::fs::read(&outcome.file_path).unwrap().len(), 4096);
        assert_eq!(collect(rx).await.last(), Some(&1.0));
    }
}
