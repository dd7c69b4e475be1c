mod dns_cache_port;
mod dns_resolver;
mod reply_sink;

pub use dns_cache_port::DnsCachePort;
pub use dns_resolver::DnsResolver;
pub use reply_sink::ReplySink;
