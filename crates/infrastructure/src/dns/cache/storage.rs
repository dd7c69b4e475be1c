use super::entry::CachedEntry;
use super::hosts_file::parse_hosts;
use super::key::CacheKey;
use super::root_hints::{ROOT_HINT_TTL, ROOT_SERVERS};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use hickory_proto::rr::rdata::{A, AAAA, NS};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use kestrel_dns_application::ports::DnsCachePort;
use kestrel_dns_domain::DomainError;
use std::net::IpAddr;
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// TTL reported for records loaded from a hosts file.
pub const HOSTS_TTL: u32 = 300;

/// In-memory record cache keyed by (name, query type).
///
/// Root hints and hosts file entries never expire. Everything stored
/// through [`DnsCachePort::store`] lives for the smallest TTL in its set
/// and is dropped lazily on the first lookup after it expired.
#[derive(Default)]
pub struct DnsMemCache {
    entries: DashMap<CacheKey, CachedEntry>,
}

impl DnsMemCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_permanent(&self, name: &str, record: Record) {
        let key = CacheKey::new(name, u16::from(record.record_type()));
        self.entries
            .entry(key)
            .and_modify(|entry| entry.add_permanent(record.clone()))
            .or_insert_with(|| CachedEntry::permanent(vec![record]));
    }
}

fn address_record(name: Name, ip: IpAddr, ttl: u32) -> Record {
    let rdata = match ip {
        IpAddr::V4(v4) => RData::A(A(v4)),
        IpAddr::V6(v6) => RData::AAAA(AAAA(v6)),
    };
    Record::from_rdata(name, ttl, rdata)
}

impl DnsCachePort for DnsMemCache {
    fn add_root_servers(&self) {
        let mut loaded = 0usize;

        for server in &ROOT_SERVERS {
            let ns_name = match Name::from_str(server.name) {
                Ok(name) => name,
                Err(e) => {
                    warn!(server = server.name, error = %e, "Skipping root hint");
                    continue;
                }
            };

            self.insert_permanent(
                ".",
                Record::from_rdata(Name::root(), ROOT_HINT_TTL, RData::NS(NS(ns_name.clone()))),
            );
            self.insert_permanent(
                server.name,
                address_record(ns_name.clone(), IpAddr::V4(server.ipv4), ROOT_HINT_TTL),
            );
            self.insert_permanent(
                server.name,
                address_record(ns_name, IpAddr::V6(server.ipv6), ROOT_HINT_TTL),
            );
            loaded += 1;
        }

        info!(root_servers = loaded, "Root hints loaded");
    }

    fn load_overrides(&self, path: &Path) -> Result<usize, DomainError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DomainError::HostsFile(path.display().to_string(), e.to_string()))?;

        let mut loaded = 0usize;
        for entry in parse_hosts(&contents) {
            let name = match Name::from_str(&entry.name) {
                Ok(name) => name,
                Err(e) => {
                    warn!(name = %entry.name, error = %e, "Skipping invalid hosts entry");
                    continue;
                }
            };

            self.insert_permanent(&entry.name, address_record(name, entry.ip, HOSTS_TTL));
            loaded += 1;
        }

        info!(path = %path.display(), entries = loaded, "Hosts file loaded");
        Ok(loaded)
    }

    fn lookup(&self, name: &str, qtype: u16) -> Option<Vec<Record>> {
        let key = CacheKey::new(name, qtype);
        let now = Instant::now();

        {
            let entry = self.entries.get(&key)?;
            if !entry.is_expired(now) {
                return Some(entry.records_at(now));
            }
        }

        self.entries.remove_if(&key, |_, entry| entry.is_expired(now));
        debug!(domain = name, qtype, "Expired cache entry removed");
        None
    }

    fn store(&self, name: &str, qtype: u16, records: Vec<Record>) {
        let Some(ttl) = records.iter().map(|r| r.ttl()).min() else {
            return;
        };
        if ttl == 0 {
            return;
        }

        let key = CacheKey::new(name, qtype);
        let count = records.len();
        let fresh = CachedEntry::expiring(records, Duration::from_secs(u64::from(ttl)));

        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_permanent() {
                    return;
                }
                occupied.insert(fresh);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(fresh);
            }
        }

        debug!(
            domain = name,
            record_type = %RecordType::from(qtype),
            records = count,
            ttl,
            "Records cached"
        );
    }
}
