//! Cache entry type

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::Clock;

/// A timestamped cached value
///
/// Entries are never mutated: a refetch replaces the whole entry.
#[derive(Clone)]
pub struct CacheEntry<T> {
    value: T,
    created_at: SystemTime,
    clock: Arc<dyn Clock>,
}

impl<T> CacheEntry<T> {
    /// Create a new entry stamped with the clock's current time
    pub fn new(value: T, clock: Arc<dyn Clock>) -> Self {
        let created_at = clock.now();
        Self {
            value,
            created_at,
            clock,
        }
    }

    /// The cached value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consume the entry, returning the value
    pub fn into_value(self) -> T {
        self.value
    }

    /// When the entry was created
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Age of the entry at `at`; zero if `at` precedes creation
    pub fn age_at(&self, at: SystemTime) -> Duration {
        at.duration_since(self.created_at).unwrap_or_default()
    }

    /// Check if the entry is within `ttl` of now (inclusive)
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age_at(self.clock.now()) <= ttl
    }

    /// Check if the entry is older than `ttl` at `reference`
    ///
    /// Sweeps sample the clock once and judge every entry against that
    /// single reference time.
    pub fn is_stale(&self, reference: SystemTime, ttl: Duration) -> bool {
        self.age_at(reference) > ttl
    }
}

impl<T: fmt::Debug> fmt::Debug for CacheEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("value", &self.value)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;

    const TTL: Duration = Duration::from_secs(60);

    fn entry_with_clock() -> (CacheEntry<&'static str>, ManualClock) {
        let clock = ManualClock::new(SystemTime::UNIX_EPOCH + Duration::from_secs(10_000));
        let entry = CacheEntry::new("value", Arc::new(clock.clone()));
        (entry, clock)
    }

    #[test]
    fn test_new_entry() {
        let (entry, clock) = entry_with_clock();
        assert_eq!(*entry.value(), "value");
        assert_eq!(entry.created_at(), clock.now());
        assert!(entry.is_fresh(TTL));
    }

    #[test]
    fn test_fresh_below_ttl() {
        let (entry, clock) = entry_with_clock();
        clock.advance(TTL - Duration::from_millis(1));
        assert!(entry.is_fresh(TTL));
    }

    #[test]
    fn test_fresh_at_exact_ttl() {
        let (entry, clock) = entry_with_clock();
        clock.advance(TTL);
        assert!(entry.is_fresh(TTL));
        assert!(!entry.is_stale(clock.now(), TTL));
    }

    #[test]
    fn test_not_fresh_past_ttl() {
        let (entry, clock) = entry_with_clock();
        clock.advance(TTL + Duration::from_millis(1));
        assert!(!entry.is_fresh(TTL));
        assert!(entry.is_stale(clock.now(), TTL));
    }

    #[test]
    fn test_is_stale_uses_reference_time_not_clock() {
        let (entry, clock) = entry_with_clock();
        let reference = clock.now() + TTL + Duration::from_secs(1);

        // Clock itself has not moved
        assert!(entry.is_fresh(TTL));
        assert!(entry.is_stale(reference, TTL));
    }

    #[test]
    fn test_clock_behind_creation_counts_as_fresh() {
        let (entry, clock) = entry_with_clock();
        clock.set(entry.created_at() - Duration::from_secs(30));
        assert_eq!(entry.age_at(clock.now()), Duration::ZERO);
        assert!(entry.is_fresh(Duration::ZERO));
    }
}
