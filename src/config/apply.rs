use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{
    PositiveU64, PositiveUsize, StressArgs, normalize_domain, parse_record_type,
};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values given on the command line always win over the file.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut StressArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "domains")
        && let Some(domains) = config.domains.as_ref()
    {
        let mut parsed = Vec::with_capacity(domains.len());
        for domain in domains {
            parsed.push(normalize_domain(domain).map_err(|err| invalid("domains", err))?);
        }
        args.domains = parsed;
    }

    if !is_cli(matches, "resolver")
        && let Some(resolver) = config.resolver.clone()
    {
        args.resolver = resolver;
    }

    if !is_cli(matches, "doh_endpoint")
        && let Some(doh) = config.doh.clone()
    {
        args.doh_endpoint = Some(doh);
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(concurrency, "concurrency")?;
    }

    if !is_cli(matches, "display_interval")
        && let Some(interval) = config.display_interval
    {
        args.display_interval = ensure_positive_u64(interval, "display_interval")?;
    }

    if !is_cli(matches, "batch_size")
        && let Some(batch_size) = config.batch_size
    {
        args.batch_size = ensure_positive_usize(batch_size, "batch_size")?;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "iterative")
        && let Some(iterative) = config.iterative
    {
        args.iterative = iterative;
    }

    if !is_cli(matches, "random_ids")
        && let Some(random) = config.random
    {
        args.random_ids = random;
    }

    if !is_cli(matches, "flood")
        && let Some(flood) = config.flood
    {
        args.flood = flood;
    }

    if !is_cli(matches, "flood_limit")
        && let Some(limit) = config.flood_limit
    {
        args.flood_limit = Some(ensure_positive_usize(limit, "flood_limit")?);
    }

    if !is_cli(matches, "record_type")
        && let Some(record_type) = config.record_type.as_deref()
    {
        args.record_type = parse_record_type(record_type).map_err(|err| invalid("type", err))?;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = Some(timeout.to_duration()?);
    }

    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration.as_ref()
    {
        args.duration = Some(duration.to_duration()?);
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_u64(value: u64, field: &'static str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value)
        .map_err(|err| AppError::config(ConfigError::FieldMustBePositive { field, source: err }))
}

fn ensure_positive_usize(value: usize, field: &'static str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value)
        .map_err(|err| AppError::config(ConfigError::FieldMustBePositive { field, source: err }))
}

fn invalid(field: &'static str, source: crate::error::ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}
