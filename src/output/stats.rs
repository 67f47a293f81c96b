//! History listing and statistics.

use std::collections::BTreeMap;

use console::style;

use crate::history::{DownloadRecord, RecordStatus};

/// Aggregate counts over a set of history records.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HistoryStats {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub total_bytes: u64,
    pub by_platform: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
}

impl HistoryStats {
    pub fn from_records(records: &[DownloadRecord]) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.total += 1;
            match record.status {
                RecordStatus::Completed => stats.completed += 1,
                RecordStatus::Failed => stats.failed += 1,
            }
            stats.total_bytes += record.file_size.unwrap_or(0);
            *stats
                .by_platform
                .entry(record.platform.to_string())
                .or_default() += 1;
            *stats
                .by_type
                .entry(record.media_type.to_string())
                .or_default() += 1;
        }
        stats
    }
}

/// Print one line per record, most recent first.
pub fn print_history(records: &[DownloadRecord]) {
    if records.is_empty() {
        println!("{}", style("No downloads yet.").dim());
        return;
    }

    for record in records {
        let status = match record.status {
            RecordStatus::Completed => style("done").green(),
            RecordStatus::Failed => style("fail").red(),
        };
        let detail = match (&record.file_path, &record.error) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(error)) => error.clone(),
            (None, None) => String::new(),
        };
        println!(
            "{} {} {:<9} {:<5} {} {}",
            style(&record.id[..8.min(record.id.len())]).dim(),
            status,
            record.platform,
            record.media_type,
            record.created_at.format("%Y-%m-%d %H:%M"),
            style(&record.title).bold(),
        );
        if !detail.is_empty() {
            println!("         {}", style(detail).dim());
        }
    }
}

/// Print aggregate statistics.
pub fn print_history_stats(stats: &HistoryStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("History Statistics:").bold());
    println!("  Downloads: {}", stats.total);
    println!("  Completed: {}", style(stats.completed).green());
    if stats.failed > 0 {
        println!("  Failed:    {}", style(stats.failed).red());
    }
    println!("  Saved:     {} bytes", stats.total_bytes);
    for (platform, count) in &stats.by_platform {
        println!("  {:<10} {}", format!("{}:", platform), count);
    }
    for (media_type, count) in &stats.by_type {
        println!("  {:<10} {}", format!("{}:", media_type), count);
    }
    println!("{}", style("═".repeat(50)).dim());
}
