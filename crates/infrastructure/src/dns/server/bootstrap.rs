use super::spawner::QueryTaskSpawner;
use super::tcp::{start_tcp_server, TcpServerHandle};
use super::udp::{start_udp_endpoint, UdpEndpointHandle};
use crate::dns::cache::DnsMemCache;
use crate::dns::resolver::ProxyResolver;
use kestrel_dns_application::ports::{DnsCachePort, DnsResolver};
use kestrel_dns_application::use_cases::HandleQueryUseCase;
use kestrel_dns_domain::{Config, ConfigError, DecodeErrorPolicy, DomainError, InternetProtocol};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Everything needed to start a server, already parsed and validated.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Bind addresses; empty means the IPv4 and IPv6 wildcards.
    pub hosts: Vec<IpAddr>,
    pub port: u16,
    pub enable_tcp: bool,
    pub enable_udp: bool,
    pub hosts_file: Option<PathBuf>,
    pub resolve_protocol: InternetProtocol,
    pub proxies: Vec<SocketAddr>,
    pub query_timeout: Duration,
    pub max_in_flight: Option<usize>,
    pub decode_error_policy: DecodeErrorPolicy,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            port: kestrel_dns_domain::DEFAULT_DNS_PORT,
            enable_tcp: true,
            enable_udp: true,
            hosts_file: None,
            resolve_protocol: InternetProtocol::Udp,
            proxies: Vec::new(),
            query_timeout: Duration::from_millis(3000),
            max_in_flight: None,
            decode_error_policy: DecodeErrorPolicy::default(),
        }
    }
}

impl ServerOptions {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            hosts: config.server.bind_addresses()?,
            port: config.server.port,
            enable_tcp: config.server.enable_tcp,
            enable_udp: config.server.enable_udp,
            hosts_file: config.dns.hosts_file.as_ref().map(PathBuf::from),
            resolve_protocol: config.dns.resolve_protocol,
            proxies: config.dns.proxy_addrs()?,
            query_timeout: Duration::from_millis(config.dns.query_timeout_ms),
            max_in_flight: config.server.max_in_flight,
            decode_error_policy: config.server.decode_error_policy,
        })
    }

    pub fn bind_addrs(&self) -> Vec<SocketAddr> {
        if self.hosts.is_empty() {
            return vec![
                SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.port),
                SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), self.port),
            ];
        }
        self.hosts
            .iter()
            .map(|ip| SocketAddr::new(*ip, self.port))
            .collect()
    }
}

/// Handles of a running server: the TCP listeners (absent when TCP is
/// disabled) and one endpoint per UDP bind address.
pub struct ServerHandles {
    pub tcp: Option<TcpServerHandle>,
    pub udp: Vec<UdpEndpointHandle>,
}

impl ServerHandles {
    pub fn into_parts(self) -> (Option<TcpServerHandle>, Vec<UdpEndpointHandle>) {
        (self.tcp, self.udp)
    }

    pub async fn shutdown(self) {
        if let Some(tcp) = self.tcp {
            tcp.shutdown().await;
        }
        for endpoint in self.udp {
            endpoint.shutdown().await;
        }
        info!("DNS server stopped");
    }
}

/// Builds the cache and the forwarding resolver from `options`, then starts
/// the listeners.
///
/// The cache is seeded with the root hints before the hosts file (if any)
/// is merged into it. A hosts file that cannot be read fails startup.
pub async fn start_server(options: &ServerOptions) -> Result<ServerHandles, DomainError> {
    let cache = Arc::new(DnsMemCache::new());
    cache.add_root_servers();

    let mut resolver = ProxyResolver::new(
        Arc::clone(&cache) as Arc<dyn DnsCachePort>,
        options.resolve_protocol,
        options.query_timeout,
    );

    if let Some(path) = &options.hosts_file {
        cache.load_overrides(path)?;
    }

    if !options.proxies.is_empty() {
        resolver.set_proxies(&options.proxies);
        info!(
            proxies = ?options.proxies,
            protocol = %options.resolve_protocol,
            "Upstream proxies configured"
        );
    }

    start_server_with_resolver(options, Arc::new(resolver)).await
}

/// Starts the listeners around an already built resolver.
pub async fn start_server_with_resolver(
    options: &ServerOptions,
    resolver: Arc<dyn DnsResolver>,
) -> Result<ServerHandles, DomainError> {
    let use_case = Arc::new(HandleQueryUseCase::new(resolver));
    let spawner = QueryTaskSpawner::new(
        use_case,
        options.decode_error_policy,
        options.max_in_flight,
    );
    let addrs = options.bind_addrs();

    let tcp = if options.enable_tcp {
        Some(start_tcp_server(&addrs, spawner.clone()).await?)
    } else {
        None
    };

    let mut udp = Vec::new();
    if options.enable_udp {
        for addr in &addrs {
            udp.push(start_udp_endpoint(*addr, spawner.clone()).await?);
        }
    }

    info!(
        tcp_listeners = tcp.as_ref().map_or(0, |t| t.local_addrs().len()),
        udp_endpoints = udp.len(),
        "DNS server ready"
    );

    Ok(ServerHandles { tcp, udp })
}
