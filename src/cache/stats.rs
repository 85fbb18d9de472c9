//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed retrievals (key not indexed or blob unreadable)
    pub misses: u64,
    /// Number of entries evicted by trimming
    pub evictions: u64,
    /// Number of sets dropped because the payload exceeds capacity
    pub rejections: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Current sum of entry sizes in bytes
    pub total_size: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    // == Update Gauges ==
    /// Updates the entry count and byte total.
    pub fn set_totals(&mut self, entries: usize, size: u64) {
        self.total_entries = entries;
        self.total_size = size;
    }
}
