use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use kestrel_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP transport (RFC 1035 §4.2.2 two-byte length prefix).
/// One connection per query.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    async fn connect(&self) -> Result<TcpStream, DomainError> {
        let stream = TcpStream::connect(self.server_addr).await.map_err(|e| {
            DomainError::TransportError(format!(
                "Connection refused by TCP server {}: {}",
                self.server_addr, e
            ))
        })?;

        stream.set_nodelay(true).map_err(|e| {
            DomainError::TransportError(format!(
                "Failed to set TCP_NODELAY on {}: {}",
                self.server_addr, e
            ))
        })?;

        Ok(stream)
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let mut stream = self.connect().await?;

        send_with_length_prefix(&mut stream, message_bytes)
            .await
            .map_err(|e| {
                DomainError::TransportError(format!(
                    "Failed to send TCP query to {}: {}",
                    self.server_addr, e
                ))
            })?;

        debug!(server = %self.server_addr, bytes_sent = message_bytes.len(), "TCP query sent");

        read_with_length_prefix(&mut stream).await.map_err(|e| {
            DomainError::TransportError(format!(
                "Failed to read TCP response from {}: {}",
                self.server_addr, e
            ))
        })
    }
}

async fn send_with_length_prefix(stream: &mut TcpStream, message: &[u8]) -> std::io::Result<()> {
    let len = u16::try_from(message.len()).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "DNS message too large for TCP")
    })?;

    let mut framed = Vec::with_capacity(2 + message.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(message);

    stream.write_all(&framed).await?;
    stream.flush().await
}

async fn read_with_length_prefix(stream: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let len = u16::from_be_bytes(len_buf) as usize;
    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf).await?;
    Ok(buf)
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let response = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::QueryTimeout)??;

        debug!(server = %self.server_addr, bytes_received = response.len(), "TCP response received");

        Ok(TransportResponse {
            bytes: Bytes::from(response),
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
