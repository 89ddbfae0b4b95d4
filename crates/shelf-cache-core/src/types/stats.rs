//! Cache statistics

/// Statistics for one cache
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a fresh entry
    pub hits: u64,
    /// Lookups with no entry at all
    pub misses: u64,
    /// Lookups that found only a stale entry
    pub expired: u64,
    /// Upstream results stored (including negative results)
    pub writes: u64,
    /// Upstream failures passed through uncached
    pub fetch_failures: u64,
    /// Entries removed by sweeps
    pub evictions: u64,
    /// Current number of entries
    pub size: usize,
}

impl CacheStats {
    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Calculate miss ratio (0.0 to 1.0); stale lookups count as misses
    pub fn miss_ratio(&self) -> f64 {
        1.0 - self.hit_ratio()
    }

    /// Total lookups (hits + misses + expired)
    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses + self.expired
    }

    /// Merge stats from another instance
    pub fn merge(&mut self, other: &CacheStats) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.expired += other.expired;
        self.writes += other.writes;
        self.fetch_failures += other.fetch_failures;
        self.evictions += other.evictions;
        self.size += other.size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = CacheStats::default();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.hit_ratio(), 0.0);
    }

    #[test]
    fn test_hit_ratio() {
        let stats = CacheStats {
            hits: 80,
            misses: 15,
            expired: 5,
            ..Default::default()
        };
        assert!((stats.hit_ratio() - 0.8).abs() < f64::EPSILON);
        assert!((stats.miss_ratio() - 0.2).abs() < 1e-9);
        assert_eq!(stats.total_requests(), 100);
    }

    #[test]
    fn test_merge_sums_sizes() {
        let mut book = CacheStats {
            hits: 1,
            size: 3,
            ..Default::default()
        };
        let search = CacheStats {
            hits: 2,
            evictions: 4,
            size: 2,
            ..Default::default()
        };
        book.merge(&search);

        assert_eq!(book.hits, 3);
        assert_eq!(book.evictions, 4);
        assert_eq!(book.size, 5);
    }
}
