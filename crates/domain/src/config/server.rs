use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// What a query task does with a message the codec could not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeErrorPolicy {
    /// The task ends and the error is discarded.
    #[default]
    Silent,
    /// The task ends after a `warn!` naming the peer and the codec error.
    Log,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Addresses to bind. Empty means the IPv4 and IPv6 wildcards.
    #[serde(default)]
    pub hosts: Vec<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_true")]
    pub enable_tcp: bool,

    #[serde(default = "default_true")]
    pub enable_udp: bool,

    /// Upper bound on concurrently running query tasks. Unbounded when unset.
    #[serde(default)]
    pub max_in_flight: Option<usize>,

    #[serde(default)]
    pub decode_error_policy: DecodeErrorPolicy,
}

impl ServerConfig {
    pub fn bind_addresses(&self) -> Result<Vec<IpAddr>, ConfigError> {
        if self.hosts.is_empty() {
            return Ok(vec![
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            ]);
        }

        self.hosts
            .iter()
            .map(|host| {
                host.trim().parse::<IpAddr>().map_err(|_| {
                    ConfigError::Validation(format!("Invalid bind address '{}'", host))
                })
            })
            .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            port: default_port(),
            enable_tcp: true,
            enable_udp: true,
            max_in_flight: None,
            decode_error_policy: DecodeErrorPolicy::default(),
        }
    }
}

fn default_port() -> u16 {
    53
}

fn default_true() -> bool {
    true
}
