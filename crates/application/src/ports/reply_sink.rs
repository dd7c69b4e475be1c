use async_trait::async_trait;
use kestrel_dns_domain::InternetProtocol;
use std::io;
use std::net::SocketAddr;

/// The part of a listener that differs per transport: how a reply reaches
/// the peer.
///
/// UDP sends a datagram to `peer`; TCP writes to the connection and ignores
/// `peer`, which is always the address captured at accept time.
#[async_trait]
pub trait ReplySink: Send + Sync {
    fn protocol(&self) -> InternetProtocol;

    async fn send_reply(&self, data: &[u8], peer: SocketAddr) -> io::Result<()>;
}
