use std::time::Duration;

use crate::config::{Destination, StressConfig};
use crate::metrics::{IntervalReport, RunTotals};

/// Fixed-point values carry two decimals.
const HUNDREDTHS: u64 = 100;
/// Microseconds per hundredth of a millisecond.
const MICROS_PER_HUNDREDTH_MS: u128 = 10;

/// Renders a value scaled by 100 as `units.hundredths`.
#[must_use]
pub fn format_fixed_x100(value: u64) -> String {
    let units = value.checked_div(HUNDREDTHS).unwrap_or(0);
    let fraction = value.checked_rem(HUNDREDTHS).unwrap_or(0);
    format!("{}.{:02}", units, fraction)
}

/// Milliseconds with two decimals, e.g. `10.25ms`.
#[must_use]
pub fn format_latency(latency: Duration) -> String {
    let hundredths = latency
        .as_micros()
        .checked_div(MICROS_PER_HUNDREDTH_MS)
        .unwrap_or(0);
    format!(
        "{}ms",
        format_fixed_x100(u64::try_from(hundredths).unwrap_or(u64::MAX))
    )
}

#[must_use]
pub fn format_optional_latency(latency: Option<Duration>) -> String {
    latency.map_or_else(|| "n/a".to_owned(), format_latency)
}

#[must_use]
pub fn destination_line(destination: &Destination) -> String {
    match destination {
        Destination::Resolver(addr) => format!("Testing resolver: {}.", addr),
        Destination::Doh(url) => format!("Testing DOH endpoint: {}.", url),
    }
}

#[must_use]
pub fn domains_line(domains: &[String]) -> String {
    format!("Target domains: [{}].", domains.join(", "))
}

#[must_use]
pub fn started_line(workers: usize) -> String {
    format!("Started {} workers.", workers)
}

/// One interval line without styling.
#[must_use]
pub fn report_line(report: &IntervalReport) -> String {
    format!(
        "Requests sent: {}r/s    Latency: mean={} max={}    Errors: {} ({}%)",
        format_fixed_x100(report.rate_x100()),
        format_optional_latency(report.avg_latency()),
        format_latency(report.max_latency),
        report.errors,
        format_fixed_x100(report.error_pct_x100()),
    )
}

/// Lines printed once the run has stopped. `flood_dispatched` is only set in
/// flood mode, where nothing is measured.
#[must_use]
pub fn summary_lines(
    config: &StressConfig,
    totals: &RunTotals,
    flood_dispatched: Option<u64>,
) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Summary:".to_owned());
    lines.push(format!("duration: {:.2?}", totals.duration));
    lines.push(format!("destination: {}", config.destination));
    if let Some(dispatched) = flood_dispatched {
        lines.push(format!("queries dispatched: {}", dispatched));
        return lines;
    }
    lines.push(format!("queries sent: {}", totals.sent));
    lines.push(format!(
        "errors: {} ({}%)",
        totals.errors,
        format_fixed_x100(totals.error_pct_x100())
    ));
    lines.push(format!(
        "average rate: {}r/s",
        format_fixed_x100(totals.rate_x100())
    ));
    lines.push(format!(
        "mean latency: {}",
        format_optional_latency(totals.avg_latency())
    ));
    lines.push(format!("max latency: {}", format_latency(totals.max_latency)));
    lines
}
