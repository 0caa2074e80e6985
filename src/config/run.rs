use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use hickory_proto::rr::RecordType;
use url::Url;

use crate::args::{
    DEFAULT_BATCH_SIZE, DEFAULT_CONCURRENCY, DEFAULT_DISPLAY_INTERVAL_MS, StressArgs,
    parse_resolver_addr,
};
use crate::error::{AppError, AppResult, ValidationError};

/// Where queries are sent. A DOH endpoint takes priority over a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Resolver(SocketAddr),
    Doh(Url),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Resolver(addr) => write!(f, "{}", addr),
            Destination::Doh(url) => write!(f, "{}", url),
        }
    }
}

/// Run configuration, fixed before the first worker starts and shared
/// read-only by every task.
#[derive(Debug, Clone)]
pub struct StressConfig {
    pub destination: Destination,
    pub concurrency: usize,
    pub batch_size: usize,
    pub display_interval: Duration,
    pub verbose: bool,
    pub iterative: bool,
    pub random_ids: bool,
    pub flood: bool,
    pub flood_limit: Option<usize>,
    pub record_type: RecordType,
    /// Per-query limit; `None` waits for every reply.
    pub timeout: Option<Duration>,
    pub run_duration: Option<Duration>,
    pub no_color: bool,
}

impl StressConfig {
    /// Configuration with the CLI defaults for the given destination.
    #[must_use]
    pub const fn new(destination: Destination) -> Self {
        Self {
            destination,
            concurrency: DEFAULT_CONCURRENCY,
            batch_size: DEFAULT_BATCH_SIZE,
            display_interval: Duration::from_millis(DEFAULT_DISPLAY_INTERVAL_MS),
            verbose: false,
            iterative: false,
            random_ids: false,
            flood: false,
            flood_limit: None,
            record_type: RecordType::A,
            timeout: None,
            run_duration: None,
            no_color: false,
        }
    }

    /// Builds the run configuration from parsed (and config-merged) args.
    ///
    /// # Errors
    ///
    /// Returns an error when the resolver address or DOH endpoint cannot be
    /// parsed, or when flags contradict each other.
    pub fn from_args(args: &StressArgs) -> AppResult<Self> {
        let destination = match args.doh_endpoint.as_deref() {
            Some(endpoint) => Destination::Doh(parse_doh_endpoint(endpoint)?),
            None => Destination::Resolver(parse_resolver_addr(&args.resolver)?),
        };

        if args.flood_limit.is_some() && !args.flood {
            return Err(AppError::validation(
                ValidationError::FloodLimitWithoutFlood,
            ));
        }

        Ok(Self {
            destination,
            concurrency: args.concurrency.get(),
            batch_size: args.batch_size.get(),
            display_interval: Duration::from_millis(args.display_interval.get()),
            verbose: args.verbose,
            iterative: args.iterative,
            random_ids: args.random_ids,
            flood: args.flood,
            flood_limit: args.flood_limit.map(|limit| limit.get()),
            record_type: args.record_type,
            timeout: args.timeout,
            run_duration: args.duration,
            no_color: args.no_color,
        })
    }

    /// Recursion-desired flag for every query of the run.
    #[must_use]
    pub const fn recursion_desired(&self) -> bool {
        !self.iterative
    }

    /// Interval reports are only produced when workers measure queries.
    #[must_use]
    pub const fn display_enabled(&self) -> bool {
        !self.flood
    }
}

fn parse_doh_endpoint(value: &str) -> AppResult<Url> {
    let url = Url::parse(value.trim()).map_err(|err| {
        AppError::validation(ValidationError::InvalidDohEndpoint {
            value: value.to_owned(),
            source: err,
        })
    })?;
    match url.scheme() {
        "https" | "http" => Ok(url),
        other => Err(AppError::validation(
            ValidationError::UnsupportedDohScheme {
                scheme: other.to_owned(),
            },
        )),
    }
}
