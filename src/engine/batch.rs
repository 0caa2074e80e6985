use std::time::Duration;

use crate::metrics::BatchSummary;

/// Running tally of the batch a worker is currently sending.
#[derive(Debug, Default)]
pub struct BatchRecorder {
    sent: u64,
    errors: u64,
    total_elapsed: Duration,
    max_elapsed: Duration,
}

impl BatchRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for one measured query.
    pub fn record(&mut self, elapsed: Duration, success: bool) {
        self.sent = self.sent.saturating_add(1);
        if !success {
            self.errors = self.errors.saturating_add(1);
        }
        self.total_elapsed = self.total_elapsed.saturating_add(elapsed);
        self.max_elapsed = self.max_elapsed.max(elapsed);
    }

    #[must_use]
    pub const fn sent(&self) -> u64 {
        self.sent
    }

    /// Returns the finished batch and starts a new one.
    pub fn finish(&mut self) -> BatchSummary {
        let batch = std::mem::take(self);
        BatchSummary {
            sent: batch.sent,
            errors: batch.errors,
            total_elapsed: batch.total_elapsed,
            max_elapsed: batch.max_elapsed,
        }
    }
}
