#![allow(dead_code)]
use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use kestrel_dns_application::codec::encode_message;
use kestrel_dns_application::ports::DnsResolver;
use kestrel_dns_infrastructure::dns::ServerOptions;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;
use tokio::net::UdpSocket;

/// Server options binding 127.0.0.1 on an ephemeral port.
pub fn loopback_options() -> ServerOptions {
    ServerOptions {
        hosts: vec![IpAddr::V4(Ipv4Addr::LOCALHOST)],
        port: 0,
        ..ServerOptions::default()
    }
}

pub fn query_bytes(id: u16, name: &str, rtype: RecordType) -> Vec<u8> {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), rtype));
    encode_message(&message).unwrap()
}

pub fn empty_query_bytes(id: u16) -> Vec<u8> {
    let message = Message::new(id, MessageType::Query, OpCode::Query);
    encode_message(&message).unwrap()
}

pub fn a_response(name: &str, ip: Ipv4Addr) -> Message {
    let name = Name::from_str(name).unwrap();
    let mut message = Message::new(0, MessageType::Response, OpCode::Query);
    message.set_response_code(ResponseCode::NoError);
    message.add_query(Query::query(name.clone(), RecordType::A));
    message.add_answer(Record::from_rdata(name, 60, RData::A(A(ip))));
    message
}

pub fn first_a(message: &Message) -> Option<Ipv4Addr> {
    message.answers().iter().find_map(|r| match r.data() {
        RData::A(a) => Some(a.0),
        _ => None,
    })
}

/// Sends one datagram from a fresh client socket and waits for the reply.
pub async fn udp_exchange(server: SocketAddr, query: &[u8]) -> Option<Message> {
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    client.send_to(query, server).await.unwrap();

    let mut buf = vec![0u8; 4096];
    let (len, from) = tokio::time::timeout(Duration::from_millis(500), client.recv_from(&mut buf))
        .await
        .ok()?
        .unwrap();
    assert_eq!(from, server);
    Some(Message::from_vec(&buf[..len]).unwrap())
}

/// Resolver answering from a fixed table, optionally after a per-name delay.
#[derive(Default)]
pub struct StaticResolver {
    answers: HashMap<(String, u16), Message>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, u16)>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(mut self, name: &str, qtype: u16, message: Message) -> Self {
        self.answers.insert((name.to_string(), qtype), message);
        self
    }

    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, u16)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsResolver for StaticResolver {
    async fn query(&self, name: &str, qtype: u16) -> Option<Message> {
        self.calls.lock().unwrap().push((name.to_string(), qtype));
        if let Some(delay) = self.delays.get(name) {
            tokio::time::sleep(*delay).await;
        }
        self.answers.get(&(name.to_string(), qtype)).cloned()
    }
}
