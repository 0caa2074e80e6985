use tracing::warn;

use crate::config::StressConfig;
use crate::dns::{DnsExchange, QueryTemplate};
use crate::error::TransportError;

/// A domain whose single check query did not get an answer.
#[derive(Debug)]
pub struct PreflightFailure {
    pub domain: String,
    pub error: TransportError,
}

/// Sends one query per domain, one after another, before any worker starts.
///
/// Failures are logged and returned; they never stop the run.
pub async fn preflight(
    config: &StressConfig,
    domains: &[String],
    transport: &dyn DnsExchange,
) -> Vec<PreflightFailure> {
    let mut failures = Vec::new();
    for domain in domains {
        let result = match QueryTemplate::new(domain, config.record_type, config.recursion_desired())
        {
            Ok(template) => transport.exchange(template.as_bytes()).await,
            Err(err) => Err(err),
        };
        if let Err(error) = result {
            warn!(
                "Checking \"{}\" against {} failed: {}",
                domain,
                transport.describe(),
                error
            );
            failures.push(PreflightFailure {
                domain: domain.clone(),
                error,
            });
        }
    }
    failures
}
