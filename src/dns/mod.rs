//! DNS query construction and the transports that carry them.
pub mod query;
pub mod transport;

pub use query::{QueryTemplate, random_query_id};
pub use transport::{DnsExchange, DohTransport, FloodDispatcher, Transport, UdpTransport};
