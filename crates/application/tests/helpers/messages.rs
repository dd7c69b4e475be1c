#![allow(dead_code)]

use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use kestrel_dns_application::codec::encode_message;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Wire bytes of a query carrying `questions` in order.
pub fn query_bytes(id: u16, questions: &[(&str, RecordType)]) -> Vec<u8> {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    for (name, rtype) in questions {
        message.add_query(Query::query(Name::from_str(name).unwrap(), *rtype));
    }
    encode_message(&message).unwrap()
}

/// A resolver result carrying one A record. Its id is deliberately not the
/// id of any request the tests send.
pub fn a_response(name: &str, ip: Ipv4Addr) -> Message {
    let name = Name::from_str(name).unwrap();
    let mut message = Message::new(0xBEEF, MessageType::Response, OpCode::Query);
    message.set_recursion_available(true);
    message.set_response_code(ResponseCode::NoError);
    message.add_query(Query::query(name.clone(), RecordType::A));
    message.add_answer(Record::from_rdata(name, 60, RData::A(A(ip))));
    message
}

pub fn nxdomain_response(name: &str) -> Message {
    let mut message = Message::new(0xBEEF, MessageType::Response, OpCode::Query);
    message.set_response_code(ResponseCode::NXDomain);
    message.add_query(Query::query(Name::from_str(name).unwrap(), RecordType::A));
    message
}
