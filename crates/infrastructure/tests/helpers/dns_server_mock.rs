#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use kestrel_dns_application::codec::encode_message;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// How the mock upstream reacts to a query.
#[derive(Debug, Clone, Copy)]
pub enum UpstreamBehavior {
    /// NOERROR with one A record (TTL 60) for the queried name.
    Answer(Ipv4Addr),
    /// An empty reply with this response code.
    Rcode(ResponseCode),
    /// Never replies.
    Silent,
}

/// Upstream DNS server for resolver tests, on 127.0.0.1 with an ephemeral
/// port. Counts the queries it receives.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn udp(behavior: UpstreamBehavior) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(reply) = build_reply(&buf[..len], behavior) {
                                let _ = socket.send_to(&reply, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// TCP upstream speaking the two-byte length-prefixed framing.
    pub async fn tcp(behavior: UpstreamBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let counter = Arc::clone(&counter);
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                return;
                            }
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(reply) = build_reply(&query, behavior) {
                                let mut framed = (reply.len() as u16).to_be_bytes().to_vec();
                                framed.extend_from_slice(&reply);
                                let _ = stream.write_all(&framed).await;
                            } else {
                                // Hold the connection open without answering.
                                let mut sink = [0u8; 1];
                                let _ = stream.read(&mut sink).await;
                            }
                        });
                    }
                }
            }
        });

        Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn build_reply(query: &[u8], behavior: UpstreamBehavior) -> Option<Vec<u8>> {
    let request = Message::from_vec(query).ok()?;

    let mut response = Message::new(request.id(), MessageType::Response, OpCode::Query);
    response.set_recursion_desired(true);
    response.set_recursion_available(true);
    for query in request.queries() {
        response.add_query(query.clone());
    }

    match behavior {
        UpstreamBehavior::Answer(ip) => {
            let name = request.queries().first()?.name().clone();
            response.set_response_code(ResponseCode::NoError);
            response.add_answer(Record::from_rdata(name, 60, RData::A(A(ip))));
        }
        UpstreamBehavior::Rcode(rcode) => {
            response.set_response_code(rcode);
        }
        UpstreamBehavior::Silent => return None,
    }

    encode_message(&response).ok()
}
