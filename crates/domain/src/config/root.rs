use serde::{Deserialize, Serialize};
use std::path::Path;

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use crate::protocol::InternetProtocol;

const LOCAL_CONFIG_PATH: &str = "kestrel-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/kestrel-dns/config.toml";

/// Main configuration structure for Kestrel DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (addresses, port, transports)
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolver configuration
    #[serde(default)]
    pub dns: DnsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. kestrel-dns.toml in current directory
    /// 3. /etc/kestrel-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if !overrides.hosts.is_empty() {
            self.server.hosts = overrides.hosts;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if overrides.no_tcp {
            self.server.enable_tcp = false;
        }
        if overrides.no_udp {
            self.server.enable_udp = false;
        }
        if let Some(hosts_file) = overrides.hosts_file {
            self.dns.hosts_file = Some(hosts_file);
        }
        if let Some(protocol) = overrides.resolve_protocol {
            self.dns.resolve_protocol = protocol;
        }
        if !overrides.proxies.is_empty() {
            self.dns.proxies = overrides.proxies;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.server.enable_tcp && !self.server.enable_udp {
            return Err(ConfigError::Validation(
                "At least one of TCP or UDP must be enabled".to_string(),
            ));
        }

        if self.server.max_in_flight == Some(0) {
            return Err(ConfigError::Validation(
                "max_in_flight must be greater than 0".to_string(),
            ));
        }

        self.server.bind_addresses()?;
        self.dns.proxy_addrs()?;

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub hosts: Vec<String>,
    pub port: Option<u16>,
    pub no_tcp: bool,
    pub no_udp: bool,
    pub hosts_file: Option<String>,
    pub resolve_protocol: Option<InternetProtocol>,
    pub proxies: Vec<String>,
    pub log_level: Option<String>,
}
