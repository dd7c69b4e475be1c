use async_trait::async_trait;
use hickory_proto::op::Message;

/// Resolution capability consumed by the query handlers.
///
/// `None` means no answer could be produced (unresolvable name, every
/// upstream failed, ...). The returned message's transaction id is
/// irrelevant; callers stamp their own.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn query(&self, name: &str, qtype: u16) -> Option<Message>;
}
