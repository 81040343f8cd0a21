//! Collection Cache Module
//!
//! Single-entry cache of the full record set, invalidated by comparing the
//! store's freshness token against the token the entry was loaded under.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheCounters, CollectionEntry};
use crate::error::{CatalogError, Result};
use crate::models::Record;
use crate::store::RecordStore;

#[derive(Debug, Default)]
struct CollectionState {
    entry: Option<CollectionEntry>,
    counters: CacheCounters,
}

// == Collection Cache ==
/// Read-through cache of the whole collection.
///
/// The token probe, reload decision, reload and replacement all run under one
/// lock, so callers arriving during a reload wait and then share its result.
pub struct CollectionCache {
    store: Arc<dyn RecordStore>,
    state: Mutex<CollectionState>,
}

impl CollectionCache {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            state: Mutex::new(CollectionState::default()),
        }
    }

    // == Get All ==
    /// Returns the current record set, reloading it if the store's token moved.
    ///
    /// A failed token probe fails the call instead of serving the old entry.
    pub async fn get_all(&self) -> Result<Arc<[Record]>> {
        let mut state = self.state.lock().await;

        let current = self.store.current_token().await.map_err(|e| {
            warn!(error = %e, "Store token probe failed");
            CatalogError::from(e)
        })?;

        let cached = state
            .entry
            .as_ref()
            .filter(|entry| !entry.is_stale(current))
            .map(|entry| entry.records.clone());

        if let Some(records) = cached {
            state.counters.record_hit();
            return Ok(records);
        }

        state.counters.record_miss();
        let (records, token) = self.store.load().await.map_err(|e| {
            warn!(error = %e, "Store load failed");
            CatalogError::from(e)
        })?;

        debug!(count = records.len(), ?token, "Collection cache reloaded");
        let entry = CollectionEntry::new(records, token);
        let records = entry.records.clone();
        state.entry = Some(entry);
        state.counters.record_reload();

        Ok(records)
    }

    // == Invalidate ==
    /// Drops the cached entry so the next read reloads unconditionally.
    pub async fn invalidate(&self) {
        self.state.lock().await.entry = None;
    }

    pub async fn counters(&self) -> CacheCounters {
        self.state.lock().await.counters
    }
}
