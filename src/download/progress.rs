//! Observable, cancellable progress channel between a transfer and its owner.
//!
//! A persistence adapter receives the [`ProgressReporter`] half and the
//! orchestrator drains the [`ProgressReceiver`] half. Reported values are
//! clamped to `[0, 1]` and never go backwards. Cancellation is checked on
//! every report, so adapters stop at their next progress checkpoint.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Create a connected reporter/receiver pair sharing a cancellation token.
pub fn progress_channel(cancel: CancellationToken) -> (ProgressReporter, ProgressReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        ProgressReporter {
            tx,
            last: 0.0,
            sent_any: false,
            cancel,
        },
        ProgressReceiver { rx },
    )
}

/// Sending half, owned by the transfer.
#[derive(Debug)]
pub struct ProgressReporter {
    tx: mpsc::UnboundedSender<f64>,
    last: f64,
    sent_any: bool,
    cancel: CancellationToken,
}

impl ProgressReporter {
    /// Report a completion fraction.
    ///
    /// Values below the last reported one are dropped. Fails with
    /// [`Error::Cancelled`] once the owner has cancelled the transfer.
    pub fn report(&mut self, fraction: f64) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let fraction = if fraction.is_nan() {
            self.last
        } else {
            fraction.clamp(0.0, 1.0)
        };

        if !self.sent_any || fraction > self.last {
            self.last = fraction;
            self.sent_any = true;
            // A dropped receiver only means nobody is watching.
            let _ = self.tx.send(fraction);
        }

        Ok(())
    }

    /// Report progress as a byte count against a known total.
    pub fn report_bytes(&mut self, done: u64, total: u64) -> Result<()> {
        if total == 0 {
            return self.checkpoint();
        }
        self.report(done as f64 / total as f64)
    }

    /// Report completion (exactly 1.0).
    pub fn finish(&mut self) -> Result<()> {
        self.report(1.0)
    }

    /// Fail if cancelled, without reporting anything.
    pub fn checkpoint(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Last value delivered to the receiver.
    pub fn last(&self) -> f64 {
        self.last
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token the transfer can `select!` on while waiting.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// Receiving half, drained by whoever tracks the session.
#[derive(Debug)]
pub struct ProgressReceiver {
    rx: mpsc::UnboundedReceiver<f64>,
}

impl ProgressReceiver {
    /// Next progress value, or `None` once the reporter is dropped.
    pub async fn recv(&mut self) -> Option<f64> {
        self.rx.recv().await
    }
}
