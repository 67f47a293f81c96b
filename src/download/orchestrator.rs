//! Download session state machine.
//!
//! One orchestrator owns one [`DownloadSession`]. Every transition happens
//! under the session's watch lock, and each accepted operation is stamped
//! with a generation number. [`DownloadOrchestrator::reset`] bumps the
//! generation, so results arriving from a superseded attempt are dropped
//! instead of overwriting the fresh session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::download::progress::progress_channel;
use crate::download::session::{DownloadSession, SessionStatus};
use crate::error::{Error, Result};
use crate::fs::{build_file_name, validate_format, FilePersistence};
use crate::history::{DownloadRecord, HistoryStore};
use crate::media::{MediaInfo, MediaResolver};
use crate::notify::{Notification, Notifier};
use crate::platform::Platform;
use crate::settings::{Quality, SettingsStore};

const BUSY_DOWNLOADING: &str = "A download is already in progress";
const BUSY_RESOLVING: &str = "Media info is still being resolved";
const NO_MEDIA: &str = "No media info available. Request media info first.";

/// Drives resolve and download requests through the session lifecycle.
pub struct DownloadOrchestrator {
    resolver: Arc<dyn MediaResolver>,
    persistence: Arc<dyn FilePersistence>,
    history: Arc<HistoryStore>,
    notifier: Arc<dyn Notifier>,
    settings: Option<Arc<SettingsStore>>,
    session: watch::Sender<DownloadSession>,
    generation: AtomicU64,
    inflight: Mutex<Option<CancellationToken>>,
}

impl DownloadOrchestrator {
    pub fn new(
        resolver: Arc<dyn MediaResolver>,
        persistence: Arc<dyn FilePersistence>,
        history: Arc<HistoryStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (session, _) = watch::channel(DownloadSession::default());
        Self {
            resolver,
            persistence,
            history,
            notifier,
            settings: None,
            session,
            generation: AtomicU64::new(0),
            inflight: Mutex::new(None),
        }
    }

    /// Gate notifications on the user's `notifications` setting.
    pub fn with_settings(mut self, settings: Arc<SettingsStore>) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Current session snapshot.
    pub fn session(&self) -> DownloadSession {
        self.session.borrow().clone()
    }

    /// Watch every session change.
    pub fn subscribe(&self) -> watch::Receiver<DownloadSession> {
        self.session.subscribe()
    }

    /// Resolve `url` into media info for the next download.
    ///
    /// Rejected with [`Error::Precondition`] while another operation is in
    /// flight; the session is left untouched in that case.
    pub async fn request_info(&self, url: &str, hint: Option<Platform>) -> Result<MediaInfo> {
        let token = CancellationToken::new();
        let mut accepted = None;
        let mut rejection = None;

        self.session.send_if_modified(|session| {
            if let Some(reason) = busy_reason(session.status) {
                rejection = Some(reason);
                return false;
            }
            accepted = Some(self.begin(&token));
            *session = DownloadSession::resolving();
            true
        });

        if let Some(reason) = rejection {
            return Err(Error::Precondition(reason.to_string()));
        }
        let Some(generation) = accepted else {
            return Err(Error::Precondition(BUSY_RESOLVING.to_string()));
        };

        tracing::debug!("Resolving {} (hint: {:?})", url, hint);

        let result = tokio::select! {
            _ = token.cancelled() => Err(Error::Cancelled),
            result = self.resolver.resolve(url, hint) => result,
        };
        self.finish(generation);

        let applied = match &result {
            Ok(info) => self.update_if_current(generation, |session| {
                session.status = SessionStatus::Idle;
                session.media_info = Some(info.clone());
            }),
            Err(Error::Cancelled) => false,
            Err(e) => {
                let message = e.to_string();
                self.update_if_current(generation, |session| {
                    session.status = SessionStatus::Failed;
                    session.media_info = None;
                    session.error = Some(message);
                })
            }
        };

        match result {
            Ok(info) if applied => {
                tracing::debug!("Resolved {} as {} {}", url, info.platform, info.media_type);
                Ok(info)
            }
            Ok(_) => Err(Error::Cancelled),
            Err(e) => {
                if applied {
                    tracing::warn!("Resolution failed for '{}': {}", url, e);
                }
                Err(e)
            }
        }
    }

    /// Download the resolved media as `format` at `quality`.
    ///
    /// Without media info the session moves to `failed` and a precondition
    /// error is returned. While another operation is in flight the call is
    /// rejected and the session is left untouched.
    pub async fn start_download(&self, quality: Quality, format: &str) -> Result<DownloadRecord> {
        let format = validate_format(format)?.to_lowercase();
        let token = CancellationToken::new();
        let mut accepted = None;
        let mut rejection = None;

        self.session.send_if_modified(|session| {
            if let Some(reason) = busy_reason(session.status) {
                rejection = Some(reason);
                return false;
            }
            match session.media_info.clone() {
                None => {
                    rejection = Some(NO_MEDIA);
                    session.status = SessionStatus::Failed;
                    session.progress = 0.0;
                    session.error = Some(NO_MEDIA.to_string());
                }
                Some(info) => {
                    accepted = Some((self.begin(&token), info));
                    session.status = SessionStatus::Downloading;
                    session.progress = 0.0;
                    session.error = None;
                }
            }
            true
        });

        if let Some(reason) = rejection {
            return Err(Error::Precondition(reason.to_string()));
        }
        let Some((generation, info)) = accepted else {
            return Err(Error::Precondition(BUSY_DOWNLOADING.to_string()));
        };

        self.emit(Notification::started(&info)).await;

        let file_name = build_file_name(&info.title, Utc::now().timestamp_millis(), &format);
        tracing::debug!("Starting download of {} as {}", info.download_source, file_name);

        let (reporter, mut progress) = progress_channel(token);
        let transfer = self.persistence.download(
            &info.download_source,
            &file_name,
            info.media_type,
            reporter,
        );
        let drain = async {
            while let Some(fraction) = progress.recv().await {
                self.update_if_current(generation, |session| {
                    if fraction > session.progress {
                        session.progress = fraction;
                    }
                });
            }
        };

        let (result, ()) = tokio::join!(transfer, drain);
        self.finish(generation);

        match result {
            Ok(outcome) => {
                let record = DownloadRecord::completed(&info, &outcome, quality, &format);
                if let Err(e) = self.history.append(record.clone()).await {
                    tracing::warn!("Download saved but history was not updated: {}", e);
                }

                let current = self.update_if_current(generation, |session| {
                    session.status = SessionStatus::Succeeded;
                    session.progress = 1.0;
                    session.error = None;
                });
                if !current {
                    tracing::debug!("Session was reset before {} finished", file_name);
                }

                tracing::info!("Downloaded {}", outcome.file_path.display());
                self.emit(Notification::completed(
                    &info,
                    outcome.file_path,
                    outcome.file_size,
                ))
                .await;
                Ok(record)
            }
            Err(Error::Cancelled) => {
                tracing::debug!("Download of {} cancelled", file_name);
                Err(Error::Cancelled)
            }
            Err(_) if !self.is_current(generation) => Err(Error::Cancelled),
            Err(e) => {
                let message = e.to_string();
                tracing::warn!("Download failed: {}", message);

                let record = DownloadRecord::failed(&info, quality, &format, &message);
                if let Err(history_err) = self.history.append(record).await {
                    tracing::warn!("Could not record failed download: {}", history_err);
                }

                self.update_if_current(generation, |session| {
                    session.status = SessionStatus::Failed;
                    session.error = Some(message.clone());
                });
                self.emit(Notification::failed(&info, message)).await;
                Err(e)
            }
        }
    }

    /// Return to `idle`, cancelling whatever is in flight.
    pub fn reset(&self) {
        self.session.send_modify(|session| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            if let Some(token) = self.inflight_lock().take() {
                token.cancel();
            }
            *session = DownloadSession::default();
        });
        tracing::debug!("Download session reset");
    }

    /// Claim a new generation for an accepted operation.
    /// Must be called while holding the session lock.
    fn begin(&self, token: &CancellationToken) -> u64 {
        *self.inflight_lock() = Some(token.clone());
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Drop the in-flight token if it still belongs to `generation`.
    fn finish(&self, generation: u64) {
        self.session.send_if_modified(|_| {
            if self.is_current(generation) {
                self.inflight_lock().take();
            }
            false
        });
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Apply `update` only if no newer operation or reset has happened.
    fn update_if_current(
        &self,
        generation: u64,
        update: impl FnOnce(&mut DownloadSession),
    ) -> bool {
        let mut applied = false;
        self.session.send_if_modified(|session| {
            if !self.is_current(generation) {
                return false;
            }
            update(session);
            applied = true;
            true
        });
        applied
    }

    fn inflight_lock(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn emit(&self, notification: Notification) {
        if let Some(settings) = &self.settings {
            if !settings.load().await.notifications {
                tracing::debug!(
                    "Notifications disabled, skipping {}",
                    notification.event.name()
                );
                return;
            }
        }
        self.notifier.notify(&notification);
    }
}

fn busy_reason(status: SessionStatus) -> Option<&'static str> {
    match status {
        SessionStatus::Downloading => Some(BUSY_DOWNLOADING),
        SessionStatus::Resolving => Some(BUSY_RESOLVING),
        _ => None,
    }
}
