//! Cache Counters Module
//!
//! Tracks hits, misses and reloads for one cache instance.

use serde::Serialize;

// == Cache Counters ==
/// Access counters for a single cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheCounters {
    /// Requests served from the cached entry
    pub hits: u64,
    /// Requests that found the entry absent or stale
    pub misses: u64,
    /// Successful refills from the underlying source
    pub reloads: u64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
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

    pub fn record_reload(&mut self) {
        self.reloads += 1;
    }
}
