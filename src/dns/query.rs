//! Packed DNS questions.
//!
//! Workers never touch a `Message` after startup: the question is packed once
//! and only the identifier bytes are rewritten between sends.

use std::str::FromStr;

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

use crate::error::TransportError;

/// Typical size of a packed single-question query.
const QUERY_CAPACITY: usize = 512;
/// The identifier occupies the first two bytes of the header.
const ID_LEN: usize = 2;

/// One worker's question in wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    wire: Vec<u8>,
}

impl QueryTemplate {
    /// Builds and packs a single-question query.
    ///
    /// # Errors
    ///
    /// Returns an error when the domain is not a valid DNS name or the
    /// message cannot be packed.
    pub fn new(
        domain: &str,
        record_type: RecordType,
        recursion_desired: bool,
    ) -> Result<Self, TransportError> {
        let message = build_query_message(domain, record_type, recursion_desired)?;
        Ok(Self {
            wire: pack_message(&message)?,
        })
    }

    #[must_use]
    pub fn id(&self) -> u16 {
        match (self.wire.first(), self.wire.get(1)) {
            (Some(high), Some(low)) => u16::from_be_bytes([*high, *low]),
            _ => 0,
        }
    }

    pub fn set_id(&mut self, id: u16) {
        if let Some(header) = self.wire.get_mut(..ID_LEN) {
            header.copy_from_slice(&id.to_be_bytes());
        }
    }

    /// Draws a fresh identifier, stores it and returns it.
    pub fn randomize_id(&mut self) -> u16 {
        let id = random_query_id();
        self.set_id(id);
        id
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.wire
    }
}

/// Uniform identifier in `[0, 65536)`.
#[must_use]
pub fn random_query_id() -> u16 {
    rand::random::<u16>()
}

pub(crate) fn build_query_message(
    domain: &str,
    record_type: RecordType,
    recursion_desired: bool,
) -> Result<Message, TransportError> {
    let name = Name::from_str(domain).map_err(|err| TransportError::InvalidName {
        name: domain.to_owned(),
        reason: err.to_string(),
    })?;

    let mut query = Query::new();
    query.set_name(name);
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(random_query_id(), MessageType::Query, OpCode::Query);
    message.set_recursion_desired(recursion_desired);
    message.add_query(query);
    Ok(message)
}

pub(crate) fn pack_message(message: &Message) -> Result<Vec<u8>, TransportError> {
    let mut buf = Vec::with_capacity(QUERY_CAPACITY);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).map_err(|err| TransportError::Pack {
        reason: err.to_string(),
    })?;
    Ok(buf)
}

/// Decodes a reply. Only well-formedness is checked, never the identifier.
pub(crate) fn decode_message(bytes: &[u8]) -> Result<Message, TransportError> {
    Message::from_vec(bytes).map_err(|err| TransportError::MalformedResponse {
        reason: err.to_string(),
    })
}
