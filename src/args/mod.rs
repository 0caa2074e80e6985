//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::StressArgs;
pub use parsers::{normalize_domain, parse_record_type, parse_resolver_addr};
pub use types::{PositiveU64, PositiveUsize};

pub(crate) use defaults::{DEFAULT_BATCH_SIZE, DEFAULT_CONCURRENCY, DEFAULT_DISPLAY_INTERVAL_MS};
pub(crate) use parsers::parse_duration_arg;
