use hickory_proto::rr::Record;
use kestrel_dns_domain::DomainError;
use std::path::Path;

/// Record cache shared by the resolver.
///
/// Bootstrap calls `add_root_servers` and `load_overrides` once, before the
/// cache is handed out; afterwards only `lookup` and `store` are used.
pub trait DnsCachePort: Send + Sync {
    /// Seeds the root zone NS set and the root servers' addresses.
    fn add_root_servers(&self);

    /// Merges a hosts file as permanent A/AAAA records. Returns the number
    /// of (name, address) entries loaded.
    fn load_overrides(&self, path: &Path) -> Result<usize, DomainError>;

    fn lookup(&self, name: &str, qtype: u16) -> Option<Vec<Record>>;

    fn store(&self, name: &str, qtype: u16, records: Vec<Record>);
}
