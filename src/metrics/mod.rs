//! Batch summaries, their aggregation, and the collector task.
mod aggregator;
mod collector;
mod types;


pub use aggregator::StatsAggregator;
pub use collector::setup_stats_collector;
pub use types::{BatchSummary, IntervalReport, RunTotals};
