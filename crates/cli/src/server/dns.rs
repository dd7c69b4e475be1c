use kestrel_dns_domain::Config;
use kestrel_dns_infrastructure::dns::{start_server, ServerOptions};
use tracing::info;

/// Starts the listeners described by `config` and serves until Ctrl-C.
pub async fn run_dns_server(config: &Config) -> anyhow::Result<()> {
    let options = ServerOptions::from_config(config)?;
    let handles = start_server(&options).await?;

    if let Some(tcp) = &handles.tcp {
        for addr in tcp.local_addrs() {
            info!(protocol = "tcp", address = %addr, "Serving");
        }
    }
    for endpoint in &handles.udp {
        info!(protocol = "udp", address = %endpoint.local_addr(), "Serving");
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    handles.shutdown().await;
    Ok(())
}
