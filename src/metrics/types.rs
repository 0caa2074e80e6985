use std::time::Duration;

/// Hundredths per unit, for fixed-point rates and percentages.
const FIXED_POINT_SCALE: u128 = 100;
/// Microseconds per second.
const MICROS_PER_SEC: u128 = 1_000_000;

/// What one worker reports after a full batch of queries.
///
/// `errors <= sent` and `max_elapsed <= total_elapsed`; both durations are
/// zero for an empty batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub sent: u64,
    pub errors: u64,
    pub total_elapsed: Duration,
    pub max_elapsed: Duration,
}

/// Statistics for one display interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalReport {
    /// Wall-clock time since the previous report.
    pub elapsed: Duration,
    pub sent: u64,
    pub errors: u64,
    /// Sum of measured query latencies.
    pub total_latency: Duration,
    /// Slowest single query seen in the interval.
    pub max_latency: Duration,
}

impl IntervalReport {
    /// Requests per second, times 100.
    #[must_use]
    pub fn rate_x100(&self) -> u64 {
        rate_x100(self.sent, self.elapsed)
    }

    #[must_use]
    pub fn avg_latency(&self) -> Option<Duration> {
        average(self.total_latency, self.sent)
    }

    /// Error percentage, times 100.
    #[must_use]
    pub fn error_pct_x100(&self) -> u64 {
        pct_x100(self.errors, self.sent)
    }
}

/// Whole-run totals returned by the collector when it stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub duration: Duration,
    pub batches: u64,
    pub sent: u64,
    pub errors: u64,
    pub total_latency: Duration,
    pub max_latency: Duration,
}

impl RunTotals {
    #[must_use]
    pub fn rate_x100(&self) -> u64 {
        rate_x100(self.sent, self.duration)
    }

    #[must_use]
    pub fn avg_latency(&self) -> Option<Duration> {
        average(self.total_latency, self.sent)
    }

    #[must_use]
    pub fn error_pct_x100(&self) -> u64 {
        pct_x100(self.errors, self.sent)
    }
}

fn rate_x100(count: u64, elapsed: Duration) -> u64 {
    let scaled = u128::from(count)
        .saturating_mul(FIXED_POINT_SCALE)
        .saturating_mul(MICROS_PER_SEC);
    scaled
        .checked_div(elapsed.as_micros())
        .map_or(0, |value| u64::try_from(value).unwrap_or(u64::MAX))
}

fn average(total: Duration, count: u64) -> Option<Duration> {
    let nanos = total.as_nanos().checked_div(u128::from(count))?;
    Some(Duration::from_nanos(
        u64::try_from(nanos).unwrap_or(u64::MAX),
    ))
}

fn pct_x100(part: u64, whole: u64) -> u64 {
    u128::from(part)
        .saturating_mul(FIXED_POINT_SCALE)
        .saturating_mul(FIXED_POINT_SCALE)
        .checked_div(u128::from(whole))
        .map_or(0, |value| u64::try_from(value).unwrap_or(u64::MAX))
}
