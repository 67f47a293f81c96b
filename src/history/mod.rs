//! Download history: records, filters and the capped store.

pub mod filter;
pub mod record;
pub mod store;

pub use filter::{HistoryFilter, TimeRange};
pub use record::{DownloadRecord, RecordStatus};
pub use store::{HistoryStore, DEFAULT_CAPACITY};
