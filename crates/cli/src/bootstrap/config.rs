use kestrel_dns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logged once the subscriber is installed, so it is not lost.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        hosts = ?config.server.hosts,
        port = config.server.port,
        tcp = config.server.enable_tcp,
        udp = config.server.enable_udp,
        resolve_protocol = %config.dns.resolve_protocol,
        proxies = config.dns.proxies.len(),
        "Configuration loaded"
    );
}
