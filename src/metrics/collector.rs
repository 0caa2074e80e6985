use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::config::StressConfig;
use crate::shutdown::ShutdownSender;

use super::{BatchSummary, IntervalReport, RunTotals, StatsAggregator};

/// `tokio::time::interval` rejects a zero period.
const MIN_DISPLAY_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns the single consumer of batch summaries.
///
/// The task keeps draining `batch_rx` until shutdown so producers never stall
/// on a full channel. When display is enabled it also emits one
/// `IntervalReport` per `display_interval`, starting one interval after
/// launch. It returns the run totals once shutdown is observed.
#[must_use]
pub fn setup_stats_collector(
    config: &StressConfig,
    shutdown_tx: &ShutdownSender,
    mut batch_rx: mpsc::Receiver<BatchSummary>,
    report_tx: Option<mpsc::UnboundedSender<IntervalReport>>,
) -> JoinHandle<RunTotals> {
    let mut shutdown_rx = shutdown_tx.subscribe();
    let period = config.display_interval.max(MIN_DISPLAY_INTERVAL);
    let display_enabled = config.display_enabled();

    tokio::spawn(async move {
        let mut state = StatsAggregator::new();
        let mut report_tx = report_tx;
        let run_start = Instant::now();
        let mut last_tick = run_start;
        let first_tick = run_start.checked_add(period).unwrap_or(run_start);
        let mut display_interval = tokio::time::interval_at(first_tick, period);
        display_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut channel_open = true;

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                maybe_summary = batch_rx.recv(), if channel_open => {
                    match maybe_summary {
                        Some(summary) => state.absorb(summary),
                        None => channel_open = false,
                    }
                },
                now = display_interval.tick(), if display_enabled => {
                    let report = state.take_interval(now.duration_since(last_tick));
                    last_tick = now;
                    if let Some(tx) = report_tx.as_ref()
                        && tx.send(report).is_err()
                    {
                        report_tx = None;
                    }
                }
            }
        }

        batch_rx.close();
        while let Ok(summary) = batch_rx.try_recv() {
            state.absorb(summary);
        }

        tracing::debug!("Stats collector stopped after {} batches", state.batches());
        state.totals(run_start.elapsed())
    })
}
