//! Download lifecycle notifications.
//!
//! The orchestrator emits one event when a transfer starts and one when it
//! ends. Delivery (console, system tray, push) belongs to the host.

use std::path::PathBuf;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::media::{MediaInfo, MediaType};
use crate::platform::Platform;

/// Named lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationEvent {
    DownloadStarted,
    DownloadCompleted,
    DownloadFailed,
}

impl NotificationEvent {
    pub fn name(&self) -> &'static str {
        match self {
            NotificationEvent::DownloadStarted => "download_started",
            NotificationEvent::DownloadCompleted => "download_completed",
            NotificationEvent::DownloadFailed => "download_failed",
        }
    }
}

/// Payload delivered to a [`Notifier`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub event: NotificationEvent,
    pub title: String,
    pub platform: Platform,
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Notification {
    fn for_media(event: NotificationEvent, info: &MediaInfo) -> Self {
        Self {
            event,
            title: info.title.clone(),
            platform: info.platform,
            media_type: info.media_type,
            file_path: None,
            file_size: None,
            error: None,
        }
    }

    pub fn started(info: &MediaInfo) -> Self {
        Self::for_media(NotificationEvent::DownloadStarted, info)
    }

    pub fn completed(info: &MediaInfo, file_path: PathBuf, file_size: Option<u64>) -> Self {
        Self {
            file_path: Some(file_path),
            file_size,
            ..Self::for_media(NotificationEvent::DownloadCompleted, info)
        }
    }

    pub fn failed(info: &MediaInfo, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::for_media(NotificationEvent::DownloadFailed, info)
        }
    }
}

/// Receives lifecycle notifications. Must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, notification: &Notification) {
        tracing::debug!("Notification dropped: {}", notification.event.name());
    }
}

/// Forwards notifications into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: &Notification) {
        if self.tx.send(notification.clone()).is_err() {
            tracing::debug!("Notification receiver closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaResolver, PlaceholderResolver};

    #[tokio::test]
    async fn test_channel_notifier_delivers_in_order() {
        let info = PlaceholderResolver::new()
            .resolve("https://www.instagram.com/p/xyz", None)
            .await
            .unwrap();
        let (notifier, mut rx) = ChannelNotifier::new();

        notifier.notify(&Notification::started(&info));
        notifier.notify(&Notification::failed(&info, "boom"));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.event.name(), "download_started");
        assert_eq!(first.platform, Platform::Instagram);
        assert_eq!(first.media_type, MediaType::Photo);

        let second = rx.recv().await.unwrap();
        assert_eq!(second.event, NotificationEvent::DownloadFailed);
        assert_eq!(second.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_event_wire_names() {
        let json = serde_json::to_value(NotificationEvent::DownloadCompleted).unwrap();
        assert_eq!(json, "download_completed");
    }

    #[test]
    fn test_send_after_receiver_dropped_is_silent() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        let info = MediaInfo {
            title: "t".into(),
            description: String::new(),
            thumbnail_url: String::new(),
            duration: None,
            source_url: "https://youtu.be/a".into(),
            download_source: "https://youtu.be/a".into(),
            media_type: MediaType::Video,
            platform: Platform::YouTube,
            quality: "HD".into(),
            approximate_size: "15MB".into(),
            candidate_formats: vec![],
        };
        notifier.notify(&Notification::started(&info));
    }
}
