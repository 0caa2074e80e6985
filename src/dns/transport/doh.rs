use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::{Client, header::ACCEPT};
use tracing::trace;
use url::Url;

use super::DnsExchange;
use crate::error::TransportError;

/// Media type of a wire-format DNS message (RFC 8484).
pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";
/// Query parameter carrying the encoded message.
const DNS_QUERY_PARAM: &str = "dns";

/// DNS-over-HTTPS using GET requests.
///
/// The body of the reply is never parsed; any non-empty body from a
/// successful response counts as an answer.
#[derive(Debug, Clone)]
pub struct DohTransport {
    client: Client,
    endpoint: Url,
}

impl DohTransport {
    /// Creates the transport and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| TransportError::BuildClient { source })?;
        Ok(Self { client, endpoint })
    }

    /// Uses a caller-configured HTTP client as is.
    #[must_use]
    pub const fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `<endpoint>?dns=<base64url without padding>`, keeping any query the
/// endpoint already carries.
#[must_use]
pub fn doh_request_url(endpoint: &Url, query: &[u8]) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair(DNS_QUERY_PARAM, &URL_SAFE_NO_PAD.encode(query));
    url
}

#[async_trait]
impl DnsExchange for DohTransport {
    async fn exchange(&self, query: &[u8]) -> Result<(), TransportError> {
        let url = doh_request_url(&self.endpoint, query);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
            .send()
            .await
            .map_err(|source| TransportError::DohRequest { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::DohStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::DohRequest { source })?;
        if body.is_empty() {
            return Err(TransportError::DohEmptyBody);
        }
        trace!(endpoint = %self.endpoint, bytes = body.len(), "DOH reply received");
        Ok(())
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}
