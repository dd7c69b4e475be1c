//! # Kestrel DNS
//!
//! Entry point: parse the command line, load configuration, start the
//! listeners and serve until Ctrl-C.

use clap::Parser;
use kestrel_dns_domain::{CliOverrides, InternetProtocol};
use tracing::info;

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "kestrel-dns")]
#[command(version)]
#[command(about = "Kestrel DNS - caching, forwarding DNS server")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listening port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Address to bind; repeat for several. Defaults to 0.0.0.0 and ::
    #[arg(short = 'b', long = "bind", value_name = "ADDR")]
    hosts: Vec<String>,

    /// Do not start the TCP listener
    #[arg(long)]
    no_tcp: bool,

    /// Do not start UDP endpoints
    #[arg(long)]
    no_udp: bool,

    /// Hosts file merged into the cache at startup
    #[arg(long, value_name = "FILE")]
    hosts_file: Option<String>,

    /// Protocol used to reach upstream proxies (udp, tcp)
    #[arg(short = 'r', long)]
    resolve_protocol: Option<InternetProtocol>,

    /// Upstream proxy (`ip` or `ip:port`); repeat for several
    #[arg(short = 'P', long = "proxy", value_name = "ADDR")]
    proxies: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        hosts: cli.hosts,
        port: cli.port,
        no_tcp: cli.no_tcp,
        no_udp: cli.no_udp,
        hosts_file: cli.hosts_file,
        resolve_protocol: cli.resolve_protocol,
        proxies: cli.proxies,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Kestrel DNS v{}", env!("CARGO_PKG_VERSION"));
    bootstrap::log_config(cli.config.as_deref(), &config);

    server::run_dns_server(&config).await?;

    info!("Server shutdown complete");
    Ok(())
}
