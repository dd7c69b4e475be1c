use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Unknown protocol: {0}")]
    UnknownProtocol(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Hosts file error in {0}: {1}")]
    HostsFile(String, String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport error: {0}")]
    TransportError(String),
}
