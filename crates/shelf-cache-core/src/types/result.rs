//! Cache lookup result type

/// Result of probing a cache slot
///
/// Every key is in exactly one of these states; a stale entry is still
/// physically present until a refetch overwrites it or a sweep removes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup<T> {
    /// Entry present and within TTL
    Fresh(T),
    /// Entry present but older than TTL
    Stale,
    /// No entry
    Absent,
}

impl<T> CacheLookup<T> {
    /// Check if this is a fresh hit
    pub fn is_fresh(&self) -> bool {
        matches!(self, CacheLookup::Fresh(_))
    }

    /// Check if the slot needs an upstream fetch
    pub fn needs_fetch(&self) -> bool {
        !self.is_fresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh() {
        let result = CacheLookup::Fresh(42);

        assert!(result.is_fresh());
        assert!(!result.needs_fetch());
        assert_eq!(result, CacheLookup::Fresh(42));
    }

    #[test]
    fn test_stale_and_absent_need_fetch() {
        let stale: CacheLookup<i32> = CacheLookup::Stale;
        let absent: CacheLookup<i32> = CacheLookup::Absent;

        assert!(stale.needs_fetch());
        assert!(absent.needs_fetch());
        assert_ne!(stale, absent);
    }
}
