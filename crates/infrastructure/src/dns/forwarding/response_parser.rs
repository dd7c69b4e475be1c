use bytes::Bytes;
use hickory_proto::op::{Message, ResponseCode};
use kestrel_dns_domain::DomainError;
use tracing::debug;

/// An upstream reply that passed validation.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub message: Message,
    pub rcode: ResponseCode,
    /// Smallest answer TTL, `None` without answers.
    pub min_ttl: Option<u32>,
}

impl UpstreamResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn has_answers(&self) -> bool {
        !self.message.answers().is_empty()
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Decodes an upstream reply and checks it answers query `expected_id`.
    ///
    /// Only NOERROR and NXDOMAIN replies are accepted; anything else (and
    /// truncated replies) is an error so the next proxy gets a chance.
    pub fn parse(response_bytes: Bytes, expected_id: u16) -> Result<UpstreamResponse, DomainError> {
        let message = Message::from_vec(&response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.id() != expected_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response id {} does not match query id {}",
                message.id(),
                expected_id
            )));
        }

        if message.truncated() {
            return Err(DomainError::InvalidDnsResponse(
                "Truncated response".to_string(),
            ));
        }

        let rcode = message.response_code();
        if !matches!(rcode, ResponseCode::NoError | ResponseCode::NXDomain) {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Upstream answered {}",
                rcode
            )));
        }

        let min_ttl = message.answers().iter().map(|r| r.ttl()).min();

        debug!(
            rcode = ?rcode,
            answers = message.answers().len(),
            bytes = response_bytes.len(),
            "DNS response parsed"
        );

        Ok(UpstreamResponse {
            message,
            rcode,
            min_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::{MessageType, OpCode};
    use kestrel_dns_application::codec::encode_message;

    fn reply(id: u16, rcode: ResponseCode) -> Bytes {
        let mut message = Message::new(id, MessageType::Response, OpCode::Query);
        message.set_response_code(rcode);
        Bytes::from(encode_message(&message).unwrap())
    }

    #[test]
    fn test_accepts_noerror_and_nxdomain() {
        assert!(ResponseParser::parse(reply(1, ResponseCode::NoError), 1).is_ok());
        let nx = ResponseParser::parse(reply(2, ResponseCode::NXDomain), 2).unwrap();
        assert!(nx.is_nxdomain());
        assert!(!nx.has_answers());
        assert_eq!(nx.min_ttl, None);
    }

    #[test]
    fn test_rejects_server_failure() {
        let result = ResponseParser::parse(reply(3, ResponseCode::ServFail), 3);
        assert!(matches!(result, Err(DomainError::InvalidDnsResponse(_))));
    }

    #[test]
    fn test_rejects_mismatched_id() {
        let result = ResponseParser::parse(reply(4, ResponseCode::NoError), 5);
        assert!(matches!(result, Err(DomainError::InvalidDnsResponse(_))));
    }

    #[test]
    fn test_rejects_garbage() {
        let result = ResponseParser::parse(Bytes::from_static(&[1, 2, 3]), 0);
        assert!(result.is_err());
    }
}
