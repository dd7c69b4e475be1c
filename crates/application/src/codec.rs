//! Thin wrappers over the `hickory-proto` wire codec.

use hickory_proto::op::Message;
use hickory_proto::rr::RecordType;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use kestrel_dns_domain::DomainError;

pub fn decode_message(bytes: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(bytes).map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))
}

pub fn encode_message(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message.emit(&mut encoder).map_err(|e| {
        DomainError::InvalidDnsMessage(format!("Failed to serialize DNS message: {}", e))
    })?;

    Ok(buf)
}

/// Mnemonic for a query type (`A`, `MX`, ...). Types the codec has no name
/// for are printed as their number.
pub fn query_type_name(qtype: u16) -> String {
    match RecordType::from(qtype) {
        RecordType::Unknown(code) => code.to_string(),
        known => known.to_string(),
    }
}
