//! DNS Message Builder
//!
//! Constructs the queries the resolver forwards upstream and the responses
//! it synthesizes from cached records.

use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name, Record, RecordType};
use kestrel_dns_application::codec::encode_message;
use kestrel_dns_domain::DomainError;
use std::str::FromStr;

/// Builds DNS messages for the forwarding resolver
pub struct MessageBuilder;

impl MessageBuilder {
    /// Parses a presentation-format name into a fully qualified one.
    /// The empty string is the root.
    pub fn parse_name(domain: &str) -> Result<Name, DomainError> {
        if domain.is_empty() || domain == "." {
            return Ok(Name::root());
        }
        let mut name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;
        name.set_fqdn(true);
        Ok(name)
    }

    fn question(domain: &str, qtype: u16) -> Result<Query, DomainError> {
        let mut query = Query::new();
        query.set_name(Self::parse_name(domain)?);
        query.set_query_type(RecordType::from(qtype));
        query.set_query_class(DNSClass::IN);
        Ok(query)
    }

    /// Build a recursive query with a random ID and serialize it.
    ///
    /// Returns the ID alongside the wire bytes so the reply can be matched.
    pub fn build_query(domain: &str, qtype: u16) -> Result<(u16, Vec<u8>), DomainError> {
        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(Self::question(domain, qtype)?);

        Ok((id, encode_message(&message)?))
    }

    /// A NOERROR response answering `domain`/`qtype` with `records`.
    ///
    /// The ID is left at zero; the query handler stamps the request's own.
    pub fn build_cached_response(
        domain: &str,
        qtype: u16,
        records: Vec<Record>,
    ) -> Result<Message, DomainError> {
        let mut message = Message::new(0, MessageType::Response, OpCode::Query);
        message.set_recursion_desired(true);
        message.set_recursion_available(true);
        message.set_response_code(ResponseCode::NoError);
        message.add_query(Self::question(domain, qtype)?);
        for record in records {
            message.add_answer(record);
        }
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::rr::rdata::A;
    use hickory_proto::rr::RData;
    use std::net::Ipv4Addr;

    #[test]
    fn test_build_query_sets_id_and_question() {
        let (id, bytes) = MessageBuilder::build_query("example.com", 1).unwrap();
        let message = Message::from_vec(&bytes).unwrap();

        assert_eq!(message.id(), id);
        assert_eq!(message.queries().len(), 1);
        assert_eq!(message.queries()[0].name().to_utf8(), "example.com.");
        assert_eq!(message.queries()[0].query_type(), RecordType::A);
    }

    #[test]
    fn test_parse_name_without_trailing_dot_is_fully_qualified() {
        let relative = MessageBuilder::parse_name("host.lan").unwrap();
        let absolute = MessageBuilder::parse_name("host.lan.").unwrap();

        assert!(relative.is_fqdn());
        assert_eq!(relative, absolute);
        assert_eq!(relative.to_ascii(), "host.lan.");
    }

    #[test]
    fn test_build_query_for_root() {
        let (_, bytes) = MessageBuilder::build_query("", 2).unwrap();
        let message = Message::from_vec(&bytes).unwrap();
        assert!(message.queries()[0].name().is_root());
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let label = "a".repeat(64);
        let result = MessageBuilder::build_query(&format!("{}.com", label), 1);
        assert!(matches!(result, Err(DomainError::InvalidDomainName(_))));
    }

    #[test]
    fn test_cached_response_carries_records() {
        let name = Name::from_str("host.lan.").unwrap();
        let record = Record::from_rdata(name, 300, RData::A(A(Ipv4Addr::new(10, 0, 0, 7))));

        let message = MessageBuilder::build_cached_response("host.lan", 1, vec![record]).unwrap();

        assert_eq!(message.response_code(), ResponseCode::NoError);
        assert_eq!(message.answers().len(), 1);
        assert_eq!(message.queries()[0].name().to_utf8(), "host.lan.");
    }
}
