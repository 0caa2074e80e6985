use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tracing::trace;

use super::{DnsExchange, with_timeout};
use crate::dns::query::decode_message;
use crate::error::TransportError;

/// Maximum UDP DNS response size with EDNS(0).
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// Plain DNS over UDP with a fresh socket for every exchange.
#[derive(Debug, Clone)]
pub struct UdpTransport {
    server: SocketAddr,
    timeout: Option<Duration>,
}

impl UdpTransport {
    #[must_use]
    pub const fn new(server: SocketAddr, timeout: Option<Duration>) -> Self {
        Self { server, timeout }
    }

    #[must_use]
    pub const fn server(&self) -> SocketAddr {
        self.server
    }

    const fn bind_addr(&self) -> SocketAddr {
        if self.server.is_ipv4() {
            SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)
        } else {
            SocketAddr::new(std::net::IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0)
        }
    }
}

#[async_trait]
impl DnsExchange for UdpTransport {
    async fn exchange(&self, query: &[u8]) -> Result<(), TransportError> {
        let socket = UdpSocket::bind(self.bind_addr())
            .await
            .map_err(|source| TransportError::Bind { source })?;
        socket
            .connect(self.server)
            .await
            .map_err(|source| TransportError::Connect {
                addr: self.server,
                source,
            })?;
        socket
            .send(query)
            .await
            .map_err(|source| TransportError::Send { source })?;

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let received = with_timeout(self.timeout, socket.recv(&mut recv_buf))
            .await?
            .map_err(|source| TransportError::Receive { source })?;
        recv_buf.truncate(received);

        decode_message(&recv_buf)?;
        trace!(server = %self.server, bytes = received, "UDP reply received");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("udp://{}", self.server)
    }
}
