//! Progress bar utilities.

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;

use crate::download::DownloadSession;

/// Bar resolution for fractional progress.
const FRACTION_STEPS: u64 = 1000;

/// Create a spinner for long-running operations.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Create a progress bar driven by a completion fraction.
pub fn create_fraction_bar(message: &str) -> ProgressBar {
    let bar = ProgressBar::new(FRACTION_STEPS);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {percent}% ({elapsed})")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar.set_message(message.to_string());
    bar
}

/// Bar position for a fraction in `[0, 1]`.
pub fn fraction_position(fraction: f64) -> u64 {
    (fraction.clamp(0.0, 1.0) * FRACTION_STEPS as f64).round() as u64
}

/// Mirror session progress onto `bar` until the sender goes away.
pub async fn follow_session(mut session: watch::Receiver<DownloadSession>, bar: ProgressBar) {
    loop {
        let progress = session.borrow_and_update().progress;
        bar.set_position(fraction_position(progress));
        if session.changed().await.is_err() {
            break;
        }
    }
}
