#![allow(dead_code)]

use async_trait::async_trait;
use kestrel_dns_application::ports::ReplySink;
use kestrel_dns_domain::InternetProtocol;
use std::io;
use std::net::SocketAddr;
use std::sync::Mutex;

/// Reply sink that keeps every reply instead of putting it on the wire.
pub struct RecordingSink {
    protocol: InternetProtocol,
    sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new(protocol: InternetProtocol) -> Self {
        Self {
            protocol,
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A sink whose every write fails, like a peer that went away.
    pub fn failing(protocol: InternetProtocol) -> Self {
        Self {
            fail: true,
            ..Self::new(protocol)
        }
    }

    pub fn sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    fn protocol(&self) -> InternetProtocol {
        self.protocol
    }

    async fn send_reply(&self, data: &[u8], peer: SocketAddr) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"));
        }
        self.sent.lock().unwrap().push((data.to_vec(), peer));
        Ok(())
    }
}
