use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Network protocol used either by a listener or by the resolver when it
/// talks to upstream servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InternetProtocol {
    #[default]
    Udp,
    Tcp,
}

impl InternetProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            InternetProtocol::Udp => "udp",
            InternetProtocol::Tcp => "tcp",
        }
    }
}

impl fmt::Display for InternetProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InternetProtocol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "udp" => Ok(InternetProtocol::Udp),
            "tcp" => Ok(InternetProtocol::Tcp),
            other => Err(DomainError::UnknownProtocol(other.to_string())),
        }
    }
}

/// Parses an upstream server address.
///
/// Accepts `ip:port`, `[v6]:port`, a bare IP or a bracketed bare IPv6
/// address. Missing ports default to 53.
pub fn parse_upstream_addr(s: &str) -> Result<SocketAddr, DomainError> {
    let s = s.trim();

    if let Ok(addr) = SocketAddr::from_str(s) {
        return Ok(addr);
    }

    let bare = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(s);

    IpAddr::from_str(bare)
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| DomainError::InvalidIpAddress(s.to_string()))
}
