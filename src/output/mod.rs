//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - History statistics

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_error, print_info, print_media_info,
    print_settings, print_success, print_warning, ConsoleNotifier,
};
pub use progress::{create_fraction_bar, create_spinner, follow_session};
pub use stats::{print_history, print_history_stats, HistoryStats};
