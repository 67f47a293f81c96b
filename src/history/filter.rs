//! History filtering by platform, media type and age.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Months, TimeZone, Utc};

use crate::history::record::DownloadRecord;
use crate::media::MediaType;
use crate::platform::Platform;

/// Age window for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    All,
    /// Since local midnight.
    Today,
    /// The last seven days.
    Week,
    /// The last calendar month.
    Month,
}

impl TimeRange {
    /// Earliest accepted timestamp relative to `now`, or `None` for no bound.
    pub fn cutoff<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Utc>> {
        let now_utc = now.with_timezone(&Utc);
        match self {
            TimeRange::All => None,
            TimeRange::Today => {
                let midnight = now.date_naive().and_hms_opt(0, 0, 0)?;
                now.timezone()
                    .from_local_datetime(&midnight)
                    .earliest()
                    .map(|start| start.with_timezone(&Utc))
                    .or_else(|| Some(now_utc - Duration::hours(24)))
            }
            TimeRange::Week => Some(now_utc - Duration::days(7)),
            TimeRange::Month => now_utc.checked_sub_months(Months::new(1)),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRange::All => write!(f, "all"),
            TimeRange::Today => write!(f, "today"),
            TimeRange::Week => write!(f, "week"),
            TimeRange::Month => write!(f, "month"),
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TimeRange::All),
            "today" => Ok(TimeRange::Today),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            _ => Err(format!("Unknown time range: {}", s)),
        }
    }
}

/// Criteria for [`HistoryStore::filter`](crate::history::HistoryStore::filter).
/// `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub platform: Option<Platform>,
    pub media_type: Option<MediaType>,
    pub time_range: TimeRange,
}

impl HistoryFilter {
    pub fn matches<Tz: TimeZone>(&self, record: &DownloadRecord, now: &DateTime<Tz>) -> bool {
        if self.platform.is_some_and(|p| p != record.platform) {
            return false;
        }
        if self.media_type.is_some_and(|t| t != record.media_type) {
            return false;
        }
        match self.time_range.cutoff(now) {
            Some(cutoff) => record.created_at >= cutoff,
            None => true,
        }
    }
}
