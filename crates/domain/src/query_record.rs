use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// Response code logged when the resolver produced no answer. It sits
/// outside the range of real DNS response codes.
pub const NO_ANSWER_RCODE: i32 = -1;

/// One line of the per-query log.
///
/// Rendered as `[<protocol>|<peer_ip>|<qtype_name>] <name> <rcode> <length>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    pub protocol: &'static str,
    pub peer_ip: IpAddr,
    pub qtype_name: Arc<str>,
    pub name: Arc<str>,
    pub response_code: i32,
    pub reply_len: usize,
}

impl QueryRecord {
    pub fn answered(&self) -> bool {
        self.response_code != NO_ANSWER_RCODE
    }
}

impl fmt::Display for QueryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}|{}|{}] {} {} {}",
            self.protocol,
            self.peer_ip,
            self.qtype_name,
            self.name,
            self.response_code,
            self.reply_len
        )
    }
}
