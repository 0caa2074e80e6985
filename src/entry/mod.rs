//! Process entry: argument parsing, config merging and runtime setup.
mod execute;

use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::StressArgs;
use crate::config::{StressConfig, apply_config, load_config};
use crate::error::{AppError, AppResult, ValidationError};

use execute::run_stress;

/// Runs the CLI with the process arguments.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration (before any
/// worker starts) and for failures of the runtime itself.
pub fn run() -> AppResult<()> {
    run_from(std::env::args_os())
}

/// Runs the CLI with explicit arguments, the first being the program name.
///
/// # Errors
///
/// See [`run`].
pub fn run_from<I, T>(raw_args: I) -> AppResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let (args, matches) = parse_args(raw_args)?;
    let args = merge_config(args, &matches)?;

    crate::logger::init_logging(args.verbose, args.no_color);

    if args.domains.is_empty() {
        StressArgs::command().print_help()?;
        println!();
        return Err(AppError::validation(ValidationError::MissingDomains));
    }

    let config = StressConfig::from_args(&args)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_stress(config, args.domains))
}

fn parse_args<I, T>(raw_args: I) -> AppResult<(StressArgs, ArgMatches)>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = StressArgs::command().get_matches_from(raw_args);
    let args = StressArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn merge_config(mut args: StressArgs, matches: &ArgMatches) -> AppResult<StressArgs> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }
    Ok(args)
}
