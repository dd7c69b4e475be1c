use super::errors::ConfigError;
use crate::protocol::{parse_upstream_addr, InternetProtocol};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Resolver configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Hosts file merged into the cache at startup
    #[serde(default)]
    pub hosts_file: Option<String>,

    /// Protocol the resolver uses to reach upstream servers
    #[serde(default)]
    pub resolve_protocol: InternetProtocol,

    /// Upstream proxies, tried in order (`ip` or `ip:port`)
    #[serde(default)]
    pub proxies: Vec<String>,

    /// Per-attempt upstream timeout
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl DnsConfig {
    pub fn proxy_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.proxies
            .iter()
            .map(|proxy| {
                parse_upstream_addr(proxy).map_err(|e| {
                    ConfigError::Validation(format!("Invalid proxy '{}': {}", proxy, e))
                })
            })
            .collect()
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            hosts_file: None,
            resolve_protocol: InternetProtocol::default(),
            proxies: Vec::new(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    3000
}
