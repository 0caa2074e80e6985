use clap::Parser;
use hickory_proto::rr::RecordType;
use std::time::Duration;

use super::parsers::{
    normalize_domain, parse_duration_arg, parse_positive_u64, parse_positive_usize,
    parse_record_type,
};
use super::defaults::DEFAULT_RESOLVER;
use super::types::{PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Send DNS requests as fast as possible to a given server and display the rate.",
    override_usage = "dnsstress [OPTIONS] <DOMAIN>..."
)]
pub struct StressArgs {
    /// Target domains; workers are spread over them round-robin
    #[arg(value_name = "DOMAIN", value_parser = normalize_domain)]
    pub domains: Vec<String>,

    /// Number of concurrent workers (also the stats channel capacity)
    #[arg(
        long,
        short = 'c',
        default_value = "50",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Update interval of the stats (in ms)
    #[arg(
        long = "display-interval",
        short = 'd',
        default_value = "1000",
        value_parser = parse_positive_u64
    )]
    pub display_interval: PositiveU64,

    /// Queries per worker between two stats updates
    #[arg(
        long = "batch-size",
        short = 'b',
        default_value = "5",
        value_parser = parse_positive_usize
    )]
    pub batch_size: PositiveUsize,

    /// Verbose logging (per-query errors, debug level unless overridden by DNSSTRESS_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Do an iterative query instead of recursive (to stress authoritative nameservers)
    #[arg(long, short = 'i')]
    pub iterative: bool,

    /// Resolver to test against (host:port, port defaults to 53)
    #[arg(long, short = 'r', default_value = DEFAULT_RESOLVER)]
    pub resolver: String,

    /// Use random request identifiers for each query
    #[arg(long = "random")]
    pub random_ids: bool,

    /// Don't wait for an answer before sending another
    #[arg(long, short = 'f')]
    pub flood: bool,

    /// Cap the number of outstanding exchanges in flood mode
    #[arg(long = "flood-limit", value_parser = parse_positive_usize)]
    pub flood_limit: Option<PositiveUsize>,

    /// DOH endpoint to use for DNS over HTTPS requests (takes priority over --resolver)
    #[arg(long = "doh")]
    pub doh_endpoint: Option<String>,

    /// Record type to query
    #[arg(
        long = "type",
        short = 't',
        default_value = "A",
        value_parser = parse_record_type
    )]
    pub record_type: RecordType,

    /// Give up on a query after this long (supports ms/s/m/h); waits for every reply otherwise
    #[arg(long, value_parser = parse_duration_arg)]
    pub timeout: Option<Duration>,

    /// Stop the run after this long (supports ms/s/m/h); runs until interrupted otherwise
    #[arg(long, value_parser = parse_duration_arg)]
    pub duration: Option<Duration>,

    /// Path to config file (TOML/JSON). Defaults to ./dnsstress.toml or ./dnsstress.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR")]
    pub no_color: bool,
}
