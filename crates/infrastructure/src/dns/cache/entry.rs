use hickory_proto::rr::Record;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct CachedEntry {
    records: Vec<Record>,
    /// `None` for permanent entries (root hints, hosts file).
    expires_at: Option<Instant>,
}

impl CachedEntry {
    pub fn permanent(records: Vec<Record>) -> Self {
        Self {
            records,
            expires_at: None,
        }
    }

    pub fn expiring(records: Vec<Record>, ttl: Duration) -> Self {
        Self {
            records,
            expires_at: Some(Instant::now() + ttl),
        }
    }

    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.expires_at.is_none()
    }

    #[inline]
    pub fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(expires_at) if now >= expires_at)
    }

    /// Adds a permanent record, turning the entry permanent. Duplicate
    /// record data is ignored.
    pub fn add_permanent(&mut self, record: Record) {
        self.expires_at = None;
        if !self.records.iter().any(|r| r.data() == record.data()) {
            self.records.push(record);
        }
    }

    /// Records as seen at `now`: expiring entries report their remaining
    /// lifetime as TTL.
    pub fn records_at(&self, now: Instant) -> Vec<Record> {
        match self.expires_at {
            None => self.records.clone(),
            Some(expires_at) => {
                let remaining =
                    u32::try_from(expires_at.saturating_duration_since(now).as_secs())
                        .unwrap_or(u32::MAX);
                self.records
                    .iter()
                    .map(|r| Record::from_rdata(r.name().clone(), remaining, r.data().clone()))
                    .collect()
            }
        }
    }
}
