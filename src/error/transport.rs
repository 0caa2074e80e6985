use std::time::Duration;

use thiserror::Error;

/// Failure of a single query exchange.
///
/// Every variant is folded into the same error counter by the workers; the
/// variants only exist so verbose logs can say what happened.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to bind UDP socket: {source}")]
    Bind {
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to send query: {source}")]
    Send {
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to receive reply: {source}")]
    Receive {
        #[source]
        source: std::io::Error,
    },
    #[error("No reply within {timeout:?}.")]
    Timeout { timeout: Duration },
    #[error("Reply was not a DNS message: {reason}")]
    MalformedResponse { reason: String },
    #[error("Failed to pack DNS query: {reason}")]
    Pack { reason: String },
    #[error("Invalid DNS name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
    #[error("DOH request failed: {source}")]
    DohRequest {
        #[source]
        source: reqwest::Error,
    },
    #[error("DOH endpoint answered with status {status}.")]
    DohStatus { status: u16 },
    #[error("Empty DOH response.")]
    DohEmptyBody,
    #[error("Failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
}
