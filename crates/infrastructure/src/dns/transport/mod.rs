pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use bytes::Bytes;
use kestrel_dns_domain::{DomainError, InternetProtocol};
use std::net::SocketAddr;
use std::time::Duration;

/// Result of a raw DNS transport operation
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format)
    pub bytes: Bytes,
    /// Which protocol was used
    pub protocol_used: &'static str,
}

/// Trait for sending raw DNS messages to an upstream server
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

/// Enum-dispatched transport, one per configured proxy.
pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(t) => t.protocol_name(),
            Self::Tcp(t) => t.protocol_name(),
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        match self {
            Self::Udp(t) => t.server_addr(),
            Self::Tcp(t) => t.server_addr(),
        }
    }
}

/// Create the transport reaching `addr` over `protocol`.
pub fn create_transport(protocol: InternetProtocol, addr: SocketAddr) -> Transport {
    match protocol {
        InternetProtocol::Udp => Transport::Udp(udp::UdpTransport::new(addr)),
        InternetProtocol::Tcp => Transport::Tcp(tcp::TcpTransport::new(addr)),
    }
}
