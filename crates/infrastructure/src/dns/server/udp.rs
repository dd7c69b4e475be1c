use super::socket::bind_udp;
use super::spawner::QueryTaskSpawner;
use async_trait::async_trait;
use kestrel_dns_application::ports::ReplySink;
use kestrel_dns_domain::{DomainError, InternetProtocol};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Largest datagram the receive loop accepts.
const MAX_DATAGRAM_SIZE: usize = 65_535;

/// One bound UDP socket serving every peer that sends to it.
pub struct UdpHandler {
    socket: Arc<UdpSocket>,
}

impl UdpHandler {
    pub fn new(socket: Arc<UdpSocket>) -> Self {
        Self { socket }
    }
}

#[async_trait]
impl ReplySink for UdpHandler {
    fn protocol(&self) -> InternetProtocol {
        InternetProtocol::Udp
    }

    async fn send_reply(&self, data: &[u8], peer: SocketAddr) -> io::Result<()> {
        self.socket.send_to(data, peer).await.map(|_| ())
    }
}

/// A running UDP endpoint. Dropping the handle stops its receive loop.
pub struct UdpEndpointHandle {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl UdpEndpointHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops the receive loop and waits for it to exit. Queries already
    /// spawned run to completion.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.task).await;
    }
}

impl Drop for UdpEndpointHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn start_udp_endpoint(
    addr: SocketAddr,
    spawner: QueryTaskSpawner,
) -> Result<UdpEndpointHandle, DomainError> {
    let socket = bind_udp(addr)
        .map_err(|e| DomainError::IoError(format!("Failed to bind UDP {}: {}", addr, e)))?;
    let local_addr = socket
        .local_addr()
        .map_err(|e| DomainError::IoError(e.to_string()))?;

    let handler = Arc::new(UdpHandler::new(Arc::new(socket)));
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let task = tokio::spawn(receive_loop(handler, spawner, shutdown_rx));

    info!(protocol = "udp", address = %local_addr, "DNS endpoint listening");

    Ok(UdpEndpointHandle {
        local_addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

async fn receive_loop(
    handler: Arc<UdpHandler>,
    spawner: QueryTaskSpawner,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => break,
            received = handler.socket.recv_from(&mut buf) => match received {
                Ok((len, peer)) => {
                    spawner.spawn(Arc::clone(&handler), buf[..len].to_vec(), peer);
                }
                Err(e) => {
                    warn!(protocol = "udp", error = %e, "UDP receive error");
                }
            }
        }
    }

    debug!(protocol = "udp", "Receive loop stopped");
}
