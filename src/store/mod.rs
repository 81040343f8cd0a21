//! Record Store Module
//!
//! Adapters over durable storage. A store loads the whole collection together
//! with a freshness token, answers cheap token probes, and appends records.
//! It holds no caching logic of its own.

mod json_file;
mod memory;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::StoreError;
use crate::models::{NewRecord, Record};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Convenience Result type for store adapters.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Freshness Token ==
/// Identifies one version of the backing store's contents.
///
/// Any change made through [`RecordStore::append`] yields a token that
/// differs from, and orders after, the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FreshnessToken {
    /// Modification instant in nanoseconds, or a write generation
    pub modified: u128,
    /// Size of the stored collection (bytes or records)
    pub len: u64,
}

impl FreshnessToken {
    pub fn new(modified: u128, len: u64) -> Self {
        Self { modified, len }
    }

    /// Token of a store that has never been written.
    pub fn zero() -> Self {
        Self::default()
    }
}

// == Record Store Trait ==
/// Boundary contract with durable storage.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Reads and parses the full collection.
    ///
    /// The returned token is never newer than the returned records.
    async fn load(&self) -> StoreResult<(Vec<Record>, FreshnessToken)>;

    /// Cheap metadata probe for the current token.
    async fn current_token(&self) -> StoreResult<FreshnessToken>;

    /// Assigns an id, persists the record and returns the id with the new token.
    async fn append(&self, record: NewRecord) -> StoreResult<(i64, FreshnessToken)>;
}

// == Id Assignment ==
/// Picks an id for a new record: the current time in milliseconds, bumped
/// past the largest existing id when the clock would collide.
pub fn next_id(existing: &[Record]) -> i64 {
    let now = Utc::now().timestamp_millis();
    match existing.iter().map(|r| r.id).max() {
        Some(max) if max >= now => max.saturating_add(1),
        _ => now,
    }
}
