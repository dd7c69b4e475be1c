use super::socket::bind_tcp;
use super::spawner::QueryTaskSpawner;
use async_trait::async_trait;
use kestrel_dns_application::ports::ReplySink;
use kestrel_dns_domain::{DomainError, InternetProtocol};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Largest chunk taken from a connection in one read; each chunk is one message.
const READ_CHUNK_SIZE: usize = 65_537;

/// Reply side of one accepted connection.
///
/// Every chunk read from the connection is handled as a whole DNS message;
/// no two-byte length prefix is stripped from requests or added to replies.
pub struct TcpHandler {
    writer: Mutex<OwnedWriteHalf>,
    peer: SocketAddr,
}

impl TcpHandler {
    pub fn new(writer: OwnedWriteHalf, peer: SocketAddr) -> Self {
        Self {
            writer: Mutex::new(writer),
            peer,
        }
    }

    /// Peer address captured at accept time.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

#[async_trait]
impl ReplySink for TcpHandler {
    fn protocol(&self) -> InternetProtocol {
        InternetProtocol::Tcp
    }

    async fn send_reply(&self, data: &[u8], _peer: SocketAddr) -> io::Result<()> {
        let mut writer = self.writer.lock().await;
        writer.write_all(data).await?;
        writer.flush().await
    }
}

/// The TCP listeners of one server. Dropping the handle stops accepting
/// and closes open connections.
pub struct TcpServerHandle {
    local_addrs: Vec<SocketAddr>,
    shutdown_tx: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl TcpServerHandle {
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        for task in self.tasks {
            let _ = task.await;
        }
    }
}

pub async fn start_tcp_server(
    addrs: &[SocketAddr],
    spawner: QueryTaskSpawner,
) -> Result<TcpServerHandle, DomainError> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut local_addrs = Vec::with_capacity(addrs.len());
    let mut tasks = Vec::with_capacity(addrs.len());

    for addr in addrs {
        let listener = bind_tcp(*addr)
            .map_err(|e| DomainError::IoError(format!("Failed to bind TCP {}: {}", addr, e)))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| DomainError::IoError(e.to_string()))?;

        tasks.push(tokio::spawn(accept_loop(
            listener,
            spawner.clone(),
            shutdown_rx.clone(),
        )));
        info!(protocol = "tcp", address = %local_addr, "DNS listener accepting");
        local_addrs.push(local_addr);
    }

    Ok(TcpServerHandle {
        local_addrs,
        shutdown_tx,
        tasks,
    })
}

async fn accept_loop(
    listener: TcpListener,
    spawner: QueryTaskSpawner,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    tokio::spawn(serve_connection(
                        stream,
                        peer,
                        spawner.clone(),
                        shutdown_rx.clone(),
                    ));
                }
                Err(e) => {
                    warn!(protocol = "tcp", error = %e, "Failed to accept connection");
                }
            }
        }
    }

    debug!(protocol = "tcp", "Accept loop stopped");
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    spawner: QueryTaskSpawner,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let (mut reader, writer) = stream.into_split();
    let handler = Arc::new(TcpHandler::new(writer, peer));
    let mut buf = vec![0u8; READ_CHUNK_SIZE];

    debug!(client = %peer, "TCP connection accepted");

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => break,
            read = reader.read(&mut buf) => match read {
                Ok(0) => break,
                Ok(n) => {
                    spawner.spawn(Arc::clone(&handler), buf[..n].to_vec(), handler.peer());
                }
                Err(e) => {
                    debug!(client = %peer, error = %e, "TCP read failed");
                    break;
                }
            }
        }
    }

    debug!(client = %peer, "TCP connection closed");
}
