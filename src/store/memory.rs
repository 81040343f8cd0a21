//! In-memory Store
//!
//! Record store with a controllable token, used to drive the caches in tests
//! and for ephemeral runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{next_id, FreshnessToken, RecordStore, StoreResult};
use crate::error::StoreError;
use crate::models::{NewRecord, Record};

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<Record>,
    generation: u128,
    unavailable: bool,
}

impl MemoryState {
    fn token(&self) -> FreshnessToken {
        FreshnessToken::new(self.generation, self.records.len() as u64)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable {
            Err(StoreError::Unavailable("memory store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Record store held entirely in memory.
///
/// The token is `(generation, record count)`; the generation advances on
/// every append and on [`MemoryStore::bump`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    loads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `records` at generation 1.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                records,
                generation: 1,
                unavailable: false,
            }),
            loads: AtomicUsize::new(0),
        }
    }

    /// Advances the token without changing the records.
    pub async fn bump(&self) {
        self.state.write().await.generation += 1;
    }

    /// Makes every subsequent call fail (or succeed again).
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.write().await.unavailable = unavailable;
    }

    /// Number of full loads served so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load(&self) -> StoreResult<(Vec<Record>, FreshnessToken)> {
        let state = self.state.read().await;
        state.check_available()?;
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok((state.records.clone(), state.token()))
    }

    async fn current_token(&self) -> StoreResult<FreshnessToken> {
        let state = self.state.read().await;
        state.check_available()?;
        Ok(state.token())
    }

    async fn append(&self, record: NewRecord) -> StoreResult<(i64, FreshnessToken)> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let id = next_id(&state.records);
        state.records.push(Record::from_new(id, record));
        state.generation += 1;
        Ok((id, state.token()))
    }
}
