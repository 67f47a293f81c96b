//! Capped, persisted download history.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Local;

use crate::error::Result;
use crate::history::filter::HistoryFilter;
use crate::history::record::DownloadRecord;
use crate::storage::{read_json, write_json, Document, KeyValueStore, HISTORY_KEY};

/// Default number of retained records.
pub const DEFAULT_CAPACITY: usize = 100;

/// Most-recent-first log of downloads kept under a single document key.
///
/// Every mutation reads the whole collection, modifies it and writes it back.
/// Two writers racing on the same store lose one of the updates.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    capacity: AtomicUsize,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>, capacity: usize) -> Self {
        Self {
            store,
            capacity: AtomicUsize::new(capacity.max(1)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.load(Ordering::Relaxed)
    }

    /// Change the cap. Takes effect on the next append. `App::save_settings`
    /// calls this with the saved `max_history_items`.
    pub fn set_capacity(&self, capacity: usize) {
        self.capacity.store(capacity.max(1), Ordering::Relaxed);
    }

    /// Add a record at the front, evicting the oldest beyond the cap.
    pub async fn append(&self, record: DownloadRecord) -> Result<()> {
        let mut records = self.load().await?;
        records.insert(0, record);
        records.truncate(self.capacity());
        self.write(&records).await
    }

    /// Up to `limit` records, most recent first.
    pub async fn list(&self, limit: Option<usize>) -> Result<Vec<DownloadRecord>> {
        let mut records = self.load().await?;
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    pub async fn get(&self, id: &str) -> Result<Option<DownloadRecord>> {
        Ok(self.load().await?.into_iter().find(|r| r.id == id))
    }

    pub async fn len(&self) -> Result<usize> {
        Ok(self.load().await?.len())
    }

    /// Records matching `filter`, most recent first.
    pub async fn filter(&self, filter: &HistoryFilter) -> Result<Vec<DownloadRecord>> {
        let now = Local::now();
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(|r| filter.matches(r, &now))
            .collect())
    }

    /// Delete a record. Returns whether anything was removed.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write(&records).await?;
        Ok(true)
    }

    pub async fn clear(&self) -> Result<()> {
        self.write(&[]).await
    }

    async fn load(&self) -> Result<Vec<DownloadRecord>> {
        match read_json::<Vec<DownloadRecord>>(self.store.as_ref(), HISTORY_KEY).await? {
            Document::Present(records) => Ok(records),
            Document::Missing => Ok(Vec::new()),
            Document::Corrupt(e) => {
                tracing::warn!("Download history is unreadable, starting empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn write(&self, records: &[DownloadRecord]) -> Result<()> {
        tracing::debug!("Writing {} history records", records.len());
        write_json(self.store.as_ref(), HISTORY_KEY, records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::record::RecordStatus;
    use crate::media::MediaType;
    use crate::platform::Platform;
    use crate::settings::Quality;
    use crate::storage::MemoryKeyValueStore;
    use chrono::{Duration, Utc};

    fn record(title: &str) -> DownloadRecord {
        DownloadRecord {
            id: uuid::Uuid::new_v4().to_string(),
            source_url: format!("https://youtube.com/watch?v={}", title),
            platform: Platform::YouTube,
            media_type: MediaType::Video,
            title: title.to_string(),
            file_path: None,
            file_size: None,
            quality: Quality::Highest,
            format: "mp4".into(),
            created_at: Utc::now(),
            status: RecordStatus::Completed,
            error: None,
        }
    }

    fn history(capacity: usize) -> HistoryStore {
        HistoryStore::new(Arc::new(MemoryKeyValueStore::new()), capacity)
    }

    #[tokio::test]
    async fn test_list_most_recent_first() {
        let history = history(DEFAULT_CAPACITY);
        history.append(record("a")).await.unwrap();
        history.append(record("b")).await.unwrap();

        let titles: Vec<_> = history
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["b", "a"]);
        assert_eq!(history.list(Some(1)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_append_evicts_oldest_beyond_cap() {
        let history = history(DEFAULT_CAPACITY);
        for i in 0..DEFAULT_CAPACITY {
            history.append(record(&format!("r{}", i))).await.unwrap();
        }
        history.append(record("newest")).await.unwrap();

        let records = history.list(None).await.unwrap();
        assert_eq!(records.len(), DEFAULT_CAPACITY);
        assert_eq!(records[0].title, "newest");
        assert_eq!(records.last().unwrap().title, "r1");
        assert!(records.iter().all(|r| r.title != "r0"));
    }

    #[tokio::test]
    async fn test_remove_missing_is_noop() {
        let history = history(10);
        let kept = record("kept");
        history.append(kept.clone()).await.unwrap();

        assert!(!history.remove("no-such-id").await.unwrap());
        assert_eq!(history.list(None).await.unwrap(), vec![kept.clone()]);

        assert!(history.remove(&kept.id).await.unwrap());
        assert!(!history.remove(&kept.id).await.unwrap());
        assert_eq!(history.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_and_clear() {
        let history = history(10);
        let r = record("x");
        history.append(r.clone()).await.unwrap();

        assert_eq!(history.get(&r.id).await.unwrap(), Some(r));
        history.clear().await.unwrap();
        assert!(history.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_document_reads_as_empty() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(HISTORY_KEY, "{\"oops\":").await.unwrap();
        let history = HistoryStore::new(kv, 10);

        assert!(history.list(None).await.unwrap().is_empty());
        history.append(record("fresh")).await.unwrap();
        assert_eq!(history.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_filter_by_platform_and_age() {
        let history = history(10);
        let mut old = record("old");
        old.created_at = Utc::now() - Duration::days(40);
        let mut insta = record("insta");
        insta.platform = Platform::Instagram;

        history.append(old).await.unwrap();
        history.append(insta).await.unwrap();
        history.append(record("yt")).await.unwrap();

        let youtube = history
            .filter(&HistoryFilter {
                platform: Some(Platform::YouTube),
                ..HistoryFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(youtube.len(), 2);

        let month = history
            .filter(&HistoryFilter {
                time_range: crate::history::TimeRange::Month,
                ..HistoryFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(month.len(), 2);
        assert!(month.iter().all(|r| r.title != "old"));
    }

    #[tokio::test]
    async fn test_capacity_change() {
        let history = history(5);
        for i in 0..5 {
            history.append(record(&i.to_string())).await.unwrap();
        }
        history.set_capacity(2);
        history.append(record("n")).await.unwrap();
        assert_eq!(history.len().await.unwrap(), 2);
    }
}
