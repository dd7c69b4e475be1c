pub mod entry;
pub mod hosts_file;
pub mod key;
pub mod root_hints;
pub mod storage;

pub use entry::CachedEntry;
pub use hosts_file::{parse_hosts, HostsEntry};
pub use key::CacheKey;
pub use root_hints::{RootServer, ROOT_HINT_TTL, ROOT_SERVERS};
pub use storage::{DnsMemCache, HOSTS_TTL};
