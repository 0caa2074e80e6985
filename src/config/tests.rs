use super::{Destination, StressConfig, apply_config, load_config_file};
use clap::{CommandFactory, FromArgMatches};
use hickory_proto::rr::RecordType;
use std::net::SocketAddr;
use std::time::Duration;
use tempfile::tempdir;

use crate::args::StressArgs;
use crate::error::{AppError, AppResult, ValidationError};

fn parse_with_matches(argv: &[&str]) -> AppResult<(StressArgs, clap::ArgMatches)> {
    let matches = StressArgs::command().try_get_matches_from(argv)?;
    let args = StressArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dnsstress.toml");
    let content = r#"
resolver = "9.9.9.9:53"
concurrency = 12
display_interval = 500
type = "aaaa"
timeout = "750ms"
domains = ["example.com", "example.org."]
"#;
    std::fs::write(&path, content)?;

    let config = load_config_file(&path)?;
    if config.resolver.as_deref() != Some("9.9.9.9:53") {
        return Err(AppError::config("Unexpected resolver"));
    }
    if config.concurrency != Some(12) {
        return Err(AppError::config("Unexpected concurrency"));
    }
    if config.record_type.as_deref() != Some("aaaa") {
        return Err(AppError::config("Unexpected record type"));
    }
    let timeout = config
        .timeout
        .as_ref()
        .ok_or_else(|| AppError::config("Expected timeout"))?
        .to_duration()?;
    if timeout != Duration::from_millis(750) {
        return Err(AppError::config(format!("Unexpected timeout {:?}", timeout)));
    }
    Ok(())
}

#[test]
fn parse_json_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dnsstress.json");
    let content = r#"{"doh": "https://dns.example/dns-query", "flood": true, "duration": 30}"#;
    std::fs::write(&path, content)?;

    let config = load_config_file(&path)?;
    if config.doh.as_deref() != Some("https://dns.example/dns-query") {
        return Err(AppError::config("Unexpected doh"));
    }
    if config.flood != Some(true) {
        return Err(AppError::config("Expected flood"));
    }
    let duration = config
        .duration
        .as_ref()
        .ok_or_else(|| AppError::config("Expected duration"))?
        .to_duration()?;
    if duration != Duration::from_secs(30) {
        return Err(AppError::config("Unexpected duration"));
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dnsstress.yaml");
    std::fs::write(&path, "resolver: 1.1.1.1")?;
    if load_config_file(&path).is_ok() {
        return Err(AppError::config("Expected yaml config to fail"));
    }
    Ok(())
}

#[test]
fn cli_values_override_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dnsstress.toml");
    std::fs::write(
        &path,
        "concurrency = 3\nbatch_size = 9\nresolver = \"10.0.0.1\"\ndomains = [\"cfg.example\"]\n",
    )?;
    let config = load_config_file(&path)?;

    let (mut args, matches) =
        parse_with_matches(&["dnsstress", "--concurrency", "7", "cli.example"])?;
    apply_config(&mut args, &matches, &config)?;

    if args.concurrency.get() != 7 {
        return Err(AppError::config("CLI concurrency should win"));
    }
    if args.batch_size.get() != 9 {
        return Err(AppError::config("Config batch_size should apply"));
    }
    if args.resolver != "10.0.0.1" {
        return Err(AppError::config("Config resolver should apply"));
    }
    if args.domains != vec!["cli.example.".to_owned()] {
        return Err(AppError::config("CLI domains should win"));
    }
    Ok(())
}

#[test]
fn config_domains_used_when_cli_has_none() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dnsstress.toml");
    std::fs::write(&path, "domains = [\"cfg.example\"]\nconcurrency = 0\n")?;
    let config = load_config_file(&path)?;

    let (mut args, matches) = parse_with_matches(&["dnsstress"])?;
    if apply_config(&mut args, &matches, &config).is_ok() {
        return Err(AppError::config("Expected zero concurrency to fail"));
    }
    if args.domains != vec!["cfg.example.".to_owned()] {
        return Err(AppError::config("Config domains should apply"));
    }
    Ok(())
}

#[test]
fn stress_config_from_defaults() -> AppResult<()> {
    let (args, _) = parse_with_matches(&["dnsstress", "example.com"])?;
    let config = StressConfig::from_args(&args)?;

    let expected: SocketAddr = "127.0.0.1:53"
        .parse()
        .map_err(|_err| AppError::config("bad fixture"))?;
    if config.destination != Destination::Resolver(expected) {
        return Err(AppError::config("Unexpected destination"));
    }
    if config.timeout.is_some() {
        return Err(AppError::config("Queries should wait for a reply by default"));
    }
    if !config.recursion_desired() || !config.display_enabled() {
        return Err(AppError::config("Unexpected flags"));
    }
    if config.record_type != RecordType::A {
        return Err(AppError::config("Unexpected record type"));
    }
    Ok(())
}

#[test]
fn default_config_waits_for_every_reply() -> AppResult<()> {
    let expected: SocketAddr = "127.0.0.1:53"
        .parse()
        .map_err(|_err| AppError::config("bad fixture"))?;
    if StressConfig::new(Destination::Resolver(expected)).timeout.is_some() {
        return Err(AppError::config("Default configuration must not time out"));
    }
    Ok(())
}

#[test]
fn stress_config_rejects_bad_resolver() -> AppResult<()> {
    let (args, _) = parse_with_matches(&["dnsstress", "-r", "bad address", "example.com"])?;
    match StressConfig::from_args(&args) {
        Err(err @ AppError::Validation(ValidationError::InvalidResolver { .. })) => {
            if err.exit_code() != 2 {
                return Err(AppError::config("Expected exit code 2"));
            }
            Ok(())
        }
        Err(other) => Err(AppError::config(format!("Unexpected error {}", other))),
        Ok(_) => Err(AppError::config("Expected bad resolver to fail")),
    }
}

#[test]
fn doh_endpoint_takes_priority() -> AppResult<()> {
    let (args, _) = parse_with_matches(&[
        "dnsstress",
        "-r",
        "bad address",
        "--doh",
        "https://dns.example/dns-query",
        "--timeout",
        "2s",
        "example.com",
    ])?;
    let config = StressConfig::from_args(&args)?;
    if !matches!(config.destination, Destination::Doh(_)) {
        return Err(AppError::config("Expected DOH destination"));
    }
    if config.timeout != Some(Duration::from_secs(2)) {
        return Err(AppError::config("Expected the opt-in timeout"));
    }
    Ok(())
}

#[test]
fn doh_endpoint_requires_http_scheme() -> AppResult<()> {
    let (args, _) = parse_with_matches(&["dnsstress", "--doh", "ftp://dns.example/", "a.example"])?;
    if StressConfig::from_args(&args).is_ok() {
        return Err(AppError::config("Expected ftp endpoint to fail"));
    }
    Ok(())
}

#[test]
fn flood_limit_requires_flood() -> AppResult<()> {
    let (args, _) = parse_with_matches(&["dnsstress", "--flood-limit", "10", "example.com"])?;
    if StressConfig::from_args(&args).is_ok() {
        return Err(AppError::config("Expected flood-limit without flood to fail"));
    }
    let (args, _) =
        parse_with_matches(&["dnsstress", "-f", "--flood-limit", "10", "example.com"])?;
    let config = StressConfig::from_args(&args)?;
    if config.flood_limit != Some(10) || config.display_enabled() {
        return Err(AppError::config("Unexpected flood settings"));
    }
    Ok(())
}
