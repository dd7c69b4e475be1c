pub mod cache;
pub mod forwarding;
pub mod resolver;
pub mod server;
pub mod transport;

pub use cache::DnsMemCache;
pub use resolver::ProxyResolver;
pub use server::{start_server, start_server_with_resolver, ServerHandles, ServerOptions};
