#![allow(dead_code)]

use async_trait::async_trait;
use hickory_proto::op::Message;
use kestrel_dns_application::ports::DnsResolver;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::RwLock;

/// Resolver double: canned answers per (name, qtype), records every call.
pub struct MockDnsResolver {
    responses: RwLock<HashMap<(String, u16), Message>>,
    delays: RwLock<HashMap<String, Duration>>,
    calls: Mutex<Vec<(String, u16)>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            delays: RwLock::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn set_response(&self, name: &str, qtype: u16, response: Message) {
        self.responses
            .write()
            .await
            .insert((name.to_string(), qtype), response);
    }

    pub async fn set_delay(&self, name: &str, delay: Duration) {
        self.delays.write().await.insert(name.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<(String, u16)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn query(&self, name: &str, qtype: u16) -> Option<Message> {
        self.calls.lock().unwrap().push((name.to_string(), qtype));

        let delay = self.delays.read().await.get(name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .read()
            .await
            .get(&(name.to_string(), qtype))
            .cloned()
    }
}
