use std::time::Duration;

use super::{BatchSummary, IntervalReport, RunTotals};

#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    sent: u64,
    errors: u64,
    latency: Duration,
    max_latency: Duration,
}

impl Counters {
    fn absorb(&mut self, summary: &BatchSummary) {
        self.sent = self.sent.saturating_add(summary.sent);
        self.errors = self.errors.saturating_add(summary.errors);
        self.latency = self.latency.saturating_add(summary.total_elapsed);
        self.max_latency = self.max_latency.max(summary.max_elapsed);
    }
}

/// Fold over the stream of batch summaries.
///
/// Sums are order-independent, so summaries may arrive from workers in any
/// interleaving.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    interval: Counters,
    run: Counters,
    batches: u64,
}

impl StatsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, summary: BatchSummary) {
        self.interval.absorb(&summary);
        self.run.absorb(&summary);
        self.batches = self.batches.saturating_add(1);
    }

    /// Closes the current interval and starts a new one.
    pub fn take_interval(&mut self, elapsed: Duration) -> IntervalReport {
        let counters = std::mem::take(&mut self.interval);
        IntervalReport {
            elapsed,
            sent: counters.sent,
            errors: counters.errors,
            total_latency: counters.latency,
            max_latency: counters.max_latency,
        }
    }

    #[must_use]
    pub const fn batches(&self) -> u64 {
        self.batches
    }

    #[must_use]
    pub const fn totals(&self, duration: Duration) -> RunTotals {
        RunTotals {
            duration,
            batches: self.batches,
            sent: self.run.sent,
            errors: self.run.errors,
            total_latency: self.run.latency,
            max_latency: self.run.max_latency,
        }
    }
}
