//! One query/response cycle against the configured destination.
mod doh;
mod flood;
mod udp;


use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{Destination, StressConfig};
use crate::error::{AppResult, TransportError};

pub use doh::{DNS_MESSAGE_CONTENT_TYPE, DohTransport, doh_request_url};
pub use flood::FloodDispatcher;
pub use udp::UdpTransport;

/// Sends one packed query and waits for one reply.
///
/// Success only means a reply arrived; its content is not compared with the
/// query.
#[async_trait]
pub trait DnsExchange: Send + Sync {
    /// Performs one exchange.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` for any socket, HTTP, timeout or decoding
    /// failure.
    async fn exchange(&self, query: &[u8]) -> Result<(), TransportError>;

    /// Short human-readable name of the destination, for logs.
    fn describe(&self) -> String {
        String::from("custom transport")
    }
}

/// Transport selected from the run configuration.
#[derive(Debug)]
pub enum Transport {
    Udp(UdpTransport),
    Doh(DohTransport),
}

impl Transport {
    /// Picks DOH when an endpoint is configured, plain UDP otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client for DOH cannot be built.
    pub fn from_config(config: &StressConfig) -> AppResult<Self> {
        match &config.destination {
            Destination::Doh(endpoint) => Ok(Transport::Doh(DohTransport::new(
                endpoint.clone(),
                config.timeout,
            )?)),
            Destination::Resolver(addr) => {
                Ok(Transport::Udp(UdpTransport::new(*addr, config.timeout)))
            }
        }
    }

    #[must_use]
    pub const fn protocol_name(&self) -> &'static str {
        match self {
            Transport::Udp(_) => "UDP",
            Transport::Doh(_) => "DOH",
        }
    }
}

#[async_trait]
impl DnsExchange for Transport {
    async fn exchange(&self, query: &[u8]) -> Result<(), TransportError> {
        match self {
            Transport::Udp(transport) => transport.exchange(query).await,
            Transport::Doh(transport) => transport.exchange(query).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Transport::Udp(transport) => transport.describe(),
            Transport::Doh(transport) => transport.describe(),
        }
    }
}

/// Bounds `future` by `limit` when one is configured.
pub(crate) async fn with_timeout<F>(
    limit: Option<Duration>,
    future: F,
) -> Result<F::Output, TransportError>
where
    F: Future,
{
    match limit {
        Some(timeout) => tokio::time::timeout(timeout, future)
            .await
            .map_err(|_elapsed| TransportError::Timeout { timeout }),
        None => Ok(future.await),
    }
}
