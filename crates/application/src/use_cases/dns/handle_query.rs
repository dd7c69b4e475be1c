use crate::codec::{decode_message, encode_message, query_type_name};
use crate::ports::{DnsResolver, ReplySink};
use kestrel_dns_domain::{DnsQuestion, DomainError, QueryRecord, NO_ANSWER_RCODE};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const QUERY_LOG_TARGET: &str = "kestrel_dns::query";

/// Use case: answer one received DNS message.
///
/// Shared by every listener; the transport only supplies the `ReplySink`.
/// Only the first question of a message is serviced. Any further questions
/// are ignored and the resolver is invoked at most once per message.
pub struct HandleQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl HandleQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// Decodes `data`, resolves its first question and replies to `peer`
    /// through `sink` when the resolver produced an answer.
    ///
    /// Returns the logged record, or `None` for a message without
    /// questions (nothing is sent or logged in that case). Decode and
    /// encode failures are returned to the caller without a log record.
    pub async fn execute<S>(
        &self,
        sink: &S,
        data: &[u8],
        peer: SocketAddr,
    ) -> Result<Option<QueryRecord>, DomainError>
    where
        S: ReplySink + ?Sized,
    {
        let request = decode_message(data)?;

        let Some(query) = request.queries().first() else {
            debug!(client = %peer.ip(), id = request.id(), "Message without questions");
            return Ok(None);
        };

        let question = DnsQuestion::new(
            DnsQuestion::normalize_name(&query.name().to_ascii()),
            u16::from(query.query_type()),
        );

        let (response_code, reply_len) =
            match self.resolver.query(&question.name, question.qtype).await {
                Some(mut response) => {
                    let mut header = *response.header();
                    header.set_id(request.id());
                    response.set_header(header);
                    let bytes = encode_message(&response)?;

                    if let Err(e) = sink.send_reply(&bytes, peer).await {
                        warn!(
                            protocol = sink.protocol().as_str(),
                            client = %peer,
                            error = %e,
                            "Failed to deliver reply"
                        );
                    }

                    (i32::from(u16::from(response.response_code())), bytes.len())
                }
                None => (NO_ANSWER_RCODE, 0),
            };

        let record = QueryRecord {
            protocol: sink.protocol().as_str(),
            peer_ip: peer.ip(),
            qtype_name: query_type_name(question.qtype).into(),
            name: question.name,
            response_code,
            reply_len,
        };

        info!(
            target: QUERY_LOG_TARGET,
            protocol = record.protocol,
            client = %record.peer_ip,
            qtype = %record.qtype_name,
            domain = %record.name,
            rcode = record.response_code,
            len = record.reply_len,
            "{}",
            record
        );

        Ok(Some(record))
    }
}
