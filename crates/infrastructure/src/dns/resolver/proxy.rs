use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use crate::dns::transport::{create_transport, Transport};
use async_trait::async_trait;
use hickory_proto::op::Message;
use hickory_proto::rr::RecordType;
use kestrel_dns_application::ports::{DnsCachePort, DnsResolver};
use kestrel_dns_domain::InternetProtocol;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Resolver that answers from the cache and otherwise forwards the question
/// to the configured proxies, in order, until one gives a usable reply.
///
/// Without proxies only cached names resolve.
pub struct ProxyResolver {
    cache: Arc<dyn DnsCachePort>,
    protocol: InternetProtocol,
    timeout: Duration,
    proxies: Vec<Transport>,
}

impl ProxyResolver {
    pub fn new(cache: Arc<dyn DnsCachePort>, protocol: InternetProtocol, timeout: Duration) -> Self {
        Self {
            cache,
            protocol,
            timeout,
            proxies: Vec::new(),
        }
    }

    /// Replaces the upstream proxies. Each one is reached over the resolver's
    /// configured protocol.
    pub fn set_proxies(&mut self, proxies: &[SocketAddr]) {
        self.proxies = proxies
            .iter()
            .map(|addr| create_transport(self.protocol, *addr))
            .collect();
    }

    pub fn protocol(&self) -> InternetProtocol {
        self.protocol
    }

    pub fn proxy_addrs(&self) -> Vec<SocketAddr> {
        self.proxies.iter().map(Transport::server_addr).collect()
    }

    fn from_cache(&self, name: &str, qtype: u16) -> Option<Message> {
        let records = self.cache.lookup(name, qtype)?;

        match MessageBuilder::build_cached_response(name, qtype, records) {
            Ok(message) => {
                debug!(domain = name, record_type = %RecordType::from(qtype), "Cache hit");
                Some(message)
            }
            Err(e) => {
                warn!(domain = name, error = %e, "Failed to build cached response");
                None
            }
        }
    }

    async fn forward(&self, name: &str, qtype: u16) -> Option<Message> {
        let (id, query) = match MessageBuilder::build_query(name, qtype) {
            Ok(built) => built,
            Err(e) => {
                debug!(domain = name, error = %e, "Cannot build upstream query");
                return None;
            }
        };

        for transport in &self.proxies {
            let server = transport.server_addr();

            let response = match transport.send(&query, self.timeout).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(
                        server = %server,
                        protocol = transport.protocol_name(),
                        domain = name,
                        error = %e,
                        "Upstream query failed"
                    );
                    continue;
                }
            };

            let upstream = match ResponseParser::parse(response.bytes, id) {
                Ok(upstream) => upstream,
                Err(e) => {
                    warn!(server = %server, domain = name, error = %e, "Unusable upstream response");
                    continue;
                }
            };

            if !upstream.is_nxdomain() && upstream.has_answers() {
                self.cache
                    .store(name, qtype, upstream.message.answers().to_vec());
            }

            debug!(
                server = %server,
                protocol = response.protocol_used,
                domain = name,
                rcode = ?upstream.rcode,
                min_ttl = ?upstream.min_ttl,
                "Upstream answered"
            );
            return Some(upstream.message);
        }

        None
    }
}

#[async_trait]
impl DnsResolver for ProxyResolver {
    async fn query(&self, name: &str, qtype: u16) -> Option<Message> {
        if let Some(message) = self.from_cache(name, qtype) {
            return Some(message);
        }

        if self.proxies.is_empty() {
            debug!(domain = name, "No cached answer and no proxies configured");
            return None;
        }

        self.forward(name, qtype).await
    }
}
