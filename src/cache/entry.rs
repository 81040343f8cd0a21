//! Cache Entry Module
//!
//! Entry shapes held by the two caches: a token-stamped record set and a
//! time-stamped value with TTL checks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::Record;
use crate::store::FreshnessToken;

// == Collection Entry ==
/// The full record set plus the token it was loaded under.
#[derive(Debug, Clone)]
pub struct CollectionEntry {
    /// Shared, immutable record set
    pub records: Arc<[Record]>,
    /// Token reported by the store alongside `records`
    pub loaded_token: FreshnessToken,
}

impl CollectionEntry {
    pub fn new(records: Vec<Record>, loaded_token: FreshnessToken) -> Self {
        Self {
            records: records.into(),
            loaded_token,
        }
    }

    /// Returns true if the store has moved past this entry's token.
    pub fn is_stale(&self, current: FreshnessToken) -> bool {
        self.loaded_token != current
    }
}

// == Timed Entry ==
/// A value stamped with the monotonic instant it was produced.
#[derive(Debug, Clone)]
pub struct TimedEntry<T> {
    /// The cached value
    pub value: T,
    created: Instant,
}

impl<T> TimedEntry<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            created: Instant::now(),
        }
    }

    /// Time elapsed since the entry was created.
    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// An entry is expired once its age is greater than or equal to the TTL,
    /// so a zero TTL never produces a hit.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_collection_entry_staleness() {
        let token = FreshnessToken::new(5, 2);
        let entry = CollectionEntry::new(Vec::new(), token);
        assert!(!entry.is_stale(token));
        assert!(entry.is_stale(FreshnessToken::new(6, 2)));
        assert!(entry.is_stale(FreshnessToken::new(5, 3)));
    }

    #[test]
    fn test_timed_entry_fresh() {
        let entry = TimedEntry::new(42);
        assert!(!entry.is_expired(Duration::from_secs(60)));
        assert!(entry.age() < Duration::from_secs(60));
    }

    #[test]
    fn test_timed_entry_zero_ttl_is_expired() {
        let entry = TimedEntry::new("v");
        assert!(entry.is_expired(Duration::ZERO));
    }

    #[test]
    fn test_timed_entry_expires() {
        let entry = TimedEntry::new(1u8);
        let ttl = Duration::from_millis(50);
        sleep(Duration::from_millis(80));
        assert!(entry.is_expired(ttl));
        assert!(entry.age() >= ttl);
    }
}
