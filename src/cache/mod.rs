//! Cache Module
//!
//! Two differently-triggered caches over one read path into the record store:
//! a token-invalidated collection cache and a TTL aggregate cache that reads
//! through it.

mod aggregate;
mod collection;
mod counters;
mod entry;


// Re-export public types
pub use aggregate::{AggregateCache, PriceRange, StatsSnapshot, DEFAULT_STATS_TTL};
pub use collection::CollectionCache;
pub use counters::CacheCounters;
pub use entry::{CollectionEntry, TimedEntry};
