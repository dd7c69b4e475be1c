/// Cache key: lower-cased name without the trailing dot, plus the numeric
/// query type. The root zone is the empty string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: String,
    pub record_type: u16,
}

impl CacheKey {
    #[inline]
    pub fn new(domain: &str, record_type: u16) -> Self {
        Self {
            domain: domain.trim_end_matches('.').to_ascii_lowercase(),
            record_type,
        }
    }
}
