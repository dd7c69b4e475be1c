use std::net::IpAddr;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsEntry {
    pub name: String,
    pub ip: IpAddr,
}

/// Parses `/etc/hosts` syntax: `ip name [aliases...]`, `#` starts a
/// comment. Lines whose first field is not an IP address are skipped.
pub fn parse_hosts(contents: &str) -> Vec<HostsEntry> {
    let mut entries = Vec::new();

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default();
        let mut fields = line.split_whitespace();

        let Some(addr) = fields.next() else {
            continue;
        };

        // Zone-scoped addresses like fe80::1%lo0 are not representable.
        let ip: IpAddr = match addr.parse() {
            Ok(ip) => ip,
            Err(_) => {
                debug!(line = line_no + 1, field = addr, "Skipping hosts line");
                continue;
            }
        };

        entries.extend(fields.map(|name| HostsEntry {
            name: name.to_ascii_lowercase(),
            ip,
        }));
    }

    entries
}
