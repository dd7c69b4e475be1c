use std::fmt;
use std::sync::Arc;

/// A single (name, query type) pair taken from an incoming message.
///
/// `name` is stored without the trailing root dot, the way it is handed to
/// the resolver and printed in the query log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: Arc<str>,
    pub qtype: u16,
}

impl DnsQuestion {
    pub fn new(name: impl Into<Arc<str>>, qtype: u16) -> Self {
        Self {
            name: name.into(),
            qtype,
        }
    }

    /// Strips a single trailing root dot. Case is kept as the client sent it.
    pub fn normalize_name(name: &str) -> &str {
        name.strip_suffix('.').unwrap_or(name)
    }
}

impl fmt::Display for DnsQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.qtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_strips_root_dot() {
        assert_eq!(DnsQuestion::normalize_name("example.com."), "example.com");
        assert_eq!(DnsQuestion::normalize_name("example.com"), "example.com");
        assert_eq!(DnsQuestion::normalize_name("."), "");
    }
}
