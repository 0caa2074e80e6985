use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use url::Url;

use super::*;
use crate::config::{Destination, StressConfig};
use crate::error::{AppError, AppResult};
use crate::metrics::{IntervalReport, RunTotals};

fn resolver() -> Destination {
    Destination::Resolver(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 53))
}

#[test]
fn fixed_point_keeps_two_decimals() -> AppResult<()> {
    for (value, expected) in [(0, "0.00"), (5, "0.05"), (123_456, "1234.56")] {
        let rendered = format_fixed_x100(value);
        if rendered != expected {
            return Err(AppError::validation(format!(
                "{} rendered as {}, expected {}",
                value, rendered, expected
            )));
        }
    }
    Ok(())
}

#[test]
fn latency_renders_in_milliseconds() -> AppResult<()> {
    if format_latency(Duration::from_micros(10_204)) != "10.20ms" {
        return Err(AppError::validation("Unexpected latency rendering"));
    }
    if format_optional_latency(None) != "n/a" {
        return Err(AppError::validation("Missing latency should render as n/a"));
    }
    Ok(())
}

#[test]
fn header_lines_name_destination_and_domains() -> AppResult<()> {
    if destination_line(&resolver()) != "Testing resolver: 127.0.0.1:53." {
        return Err(AppError::validation("Unexpected resolver line"));
    }
    let endpoint = Url::parse("https://dns.example/dns-query")
        .map_err(|err| AppError::validation(format!("bad url: {}", err)))?;
    if destination_line(&Destination::Doh(endpoint))
        != "Testing DOH endpoint: https://dns.example/dns-query."
    {
        return Err(AppError::validation("Unexpected DOH line"));
    }
    let domains = vec!["example.com.".to_owned(), "example.org.".to_owned()];
    if domains_line(&domains) != "Target domains: [example.com., example.org.]." {
        return Err(AppError::validation("Unexpected domains line"));
    }
    if started_line(4) != "Started 4 workers." {
        return Err(AppError::validation("Unexpected started line"));
    }
    Ok(())
}

#[test]
fn report_line_shows_rate_latency_and_errors() -> AppResult<()> {
    let report = IntervalReport {
        elapsed: Duration::from_secs(1),
        sent: 200,
        errors: 2,
        total_latency: Duration::from_millis(2_000),
        max_latency: Duration::from_millis(31),
    };
    let line = report_line(&report);
    let expected =
        "Requests sent: 200.00r/s    Latency: mean=10.00ms max=31.00ms    Errors: 2 (1.00%)";
    if line != expected {
        return Err(AppError::validation(format!("Unexpected line: {}", line)));
    }
    Ok(())
}

#[test]
fn flood_summary_reports_dispatch_count_only() -> AppResult<()> {
    let config = StressConfig::new(resolver());
    let totals = RunTotals {
        duration: Duration::from_secs(2),
        ..RunTotals::default()
    };
    let lines = summary_lines(&config, &totals, Some(42));
    if !lines.iter().any(|line| line == "queries dispatched: 42") {
        return Err(AppError::validation("Missing dispatch count"));
    }
    if lines.iter().any(|line| line.starts_with("queries sent")) {
        return Err(AppError::validation("Flood summary should not count replies"));
    }
    Ok(())
}

#[test]
fn measured_summary_lists_totals() -> AppResult<()> {
    let config = StressConfig::new(resolver());
    let totals = RunTotals {
        duration: Duration::from_secs(2),
        batches: 4,
        sent: 20,
        errors: 1,
        total_latency: Duration::from_millis(200),
        max_latency: Duration::from_millis(15),
    };
    let lines = summary_lines(&config, &totals, None);
    for expected in [
        "queries sent: 20",
        "errors: 1 (5.00%)",
        "average rate: 10.00r/s",
        "mean latency: 10.00ms",
        "max latency: 15.00ms",
    ] {
        if !lines.iter().any(|line| line == expected) {
            return Err(AppError::validation(format!(
                "Missing summary line '{}' in {:?}",
                expected, lines
            )));
        }
    }
    Ok(())
}

#[test]
fn plain_style_never_colors() -> AppResult<()> {
    if ConsoleStyle::plain().color_enabled() || ConsoleStyle::detect(true).color_enabled() {
        return Err(AppError::validation("Color should be disabled"));
    }
    Ok(())
}
