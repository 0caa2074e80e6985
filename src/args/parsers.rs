use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;
use std::time::Duration;

use hickory_proto::rr::RecordType;

use super::defaults::DEFAULT_DNS_PORT;
use crate::error::{AppError, AppResult, ValidationError};

/// Appends the root label so every target is fully qualified.
///
/// # Errors
///
/// Returns an error when the domain is empty or contains whitespace.
pub fn normalize_domain(s: &str) -> Result<String, ValidationError> {
    let value = s.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidDomain {
            value: s.to_owned(),
        });
    }
    if value.ends_with('.') {
        Ok(value.to_owned())
    } else {
        Ok(format!("{}.", value))
    }
}

/// Parses a record type mnemonic such as `A`, `aaaa` or `MX`.
///
/// # Errors
///
/// Returns an error when the mnemonic is unknown.
pub fn parse_record_type(s: &str) -> Result<RecordType, ValidationError> {
    let upper = s.trim().to_ascii_uppercase();
    RecordType::from_str(&upper).map_err(|_err| ValidationError::InvalidRecordType {
        value: s.to_owned(),
    })
}

/// Parses a resolver address, defaulting the port to 53.
///
/// Accepts `ip`, `ip:port`, `[v6]`, `[v6]:port`, bare IPv6 and `host[:port]`.
/// Host names are resolved once, here; the first address wins.
///
/// # Errors
///
/// Returns an error when the value is neither an address nor a resolvable
/// host name.
pub fn parse_resolver_addr(s: &str) -> Result<SocketAddr, ValidationError> {
    let value = s.trim();
    let invalid = |reason: &str| ValidationError::InvalidResolver {
        value: s.to_owned(),
        reason: reason.to_owned(),
    };
    if value.is_empty() {
        return Err(invalid("empty address"));
    }

    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = value.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT));
    }
    if let Some(inner) = value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return inner
            .parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
            .map_err(|_err| invalid("invalid IPv6 address"));
    }

    let (host, port) = match value.split_once(':') {
        Some((host, port)) => {
            let port: u16 = port.parse().map_err(|_err| invalid("invalid port"))?;
            (host, port)
        }
        None => (value, DEFAULT_DNS_PORT),
    };
    if !is_valid_hostname(host) {
        return Err(invalid("not an IP address or host name"));
    }

    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|err| invalid(&err.to_string()))?;
    addrs
        .next()
        .ok_or_else(|| invalid("host name did not resolve"))
}

fn is_valid_hostname(host: &str) -> bool {
    !host.is_empty()
        && !host.starts_with('-')
        && host
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '.')
}

pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    let value = s.trim();
    if value.is_empty() {
        return Err(AppError::validation(ValidationError::DurationEmpty));
    }

    let mut digits_len = 0usize;
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            digits_len = digits_len.saturating_add(1);
        } else {
            break;
        }
    }
    if digits_len == 0 {
        return Err(AppError::validation(
            ValidationError::InvalidDurationFormat {
                value: value.to_owned(),
            },
        ));
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part.parse().map_err(|err| {
        AppError::validation(ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })
    })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow))?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|seconds| seconds.checked_mul(60))
                .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow))?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(AppError::validation(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            }));
        }
    };

    if duration.as_millis() == 0 {
        return Err(AppError::validation(ValidationError::DurationZero));
    }

    Ok(duration)
}

pub(super) fn parse_positive_u64(s: &str) -> Result<super::PositiveU64, ValidationError> {
    s.parse::<super::PositiveU64>()
}

pub(super) fn parse_positive_usize(s: &str) -> Result<super::PositiveUsize, ValidationError> {
    s.parse::<super::PositiveUsize>()
}
