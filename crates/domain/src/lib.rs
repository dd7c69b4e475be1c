//! Kestrel DNS Domain Layer
pub mod config;
pub mod dns_question;
pub mod errors;
pub mod protocol;
pub mod query_record;

pub use config::{CliOverrides, Config, ConfigError, DecodeErrorPolicy};
pub use dns_question::DnsQuestion;
pub use errors::DomainError;
pub use protocol::{parse_upstream_addr, InternetProtocol, DEFAULT_DNS_PORT};
pub use query_record::{QueryRecord, NO_ANSWER_RCODE};
