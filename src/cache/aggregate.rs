//! Aggregate Cache Module
//!
//! TTL cache of catalog summary statistics. A hit never touches the
//! collection; a miss recomputes over the full record set.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheCounters, CollectionCache, TimedEntry};
use crate::error::Result;
use crate::models::Record;

/// Default snapshot lifetime.
pub const DEFAULT_STATS_TTL: Duration = Duration::from_secs(5 * 60);

// == Stats Snapshot ==
/// Inclusive bounds of the finite prices in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Summary statistics of the collection at one point in time.
///
/// An empty collection only carries `total` and `averagePrice`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total: usize,
    pub average_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    pub computed_at: DateTime<Utc>,
}

impl StatsSnapshot {
    /// Computes statistics over `records`.
    ///
    /// Non-finite prices are left out of the mean and the range but the record
    /// still counts toward `total` and `categoryCount`.
    pub fn compute(records: &[Record], computed_at: DateTime<Utc>) -> Self {
        if records.is_empty() {
            return Self {
                total: 0,
                average_price: 0.0,
                category_count: None,
                price_range: None,
                computed_at,
            };
        }

        let prices: Vec<f64> = records
            .iter()
            .map(|r| r.price)
            .filter(|p| p.is_finite())
            .collect();

        let categories: HashSet<&str> = records.iter().map(|r| r.category.as_str()).collect();

        let (average_price, price_range) = if prices.is_empty() {
            (0.0, None)
        } else {
            let sum: f64 = prices.iter().sum();
            let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
            let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (sum / prices.len() as f64, Some(PriceRange { min, max }))
        };

        Self {
            total: records.len(),
            average_price,
            category_count: Some(categories.len()),
            price_range,
            computed_at,
        }
    }
}

#[derive(Debug, Default)]
struct AggregateState {
    entry: Option<TimedEntry<StatsSnapshot>>,
    counters: CacheCounters,
}

// == Aggregate Cache ==
/// TTL cache over [`StatsSnapshot`], reading through a [`CollectionCache`].
///
/// Writes to the store do not invalidate it; a snapshot may lag behind the
/// collection for up to one TTL.
pub struct AggregateCache {
    collection: Arc<CollectionCache>,
    ttl: Duration,
    state: Mutex<AggregateState>,
}

impl AggregateCache {
    pub fn new(collection: Arc<CollectionCache>, ttl: Duration) -> Self {
        Self {
            collection,
            ttl,
            state: Mutex::new(AggregateState::default()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get Stats ==
    /// Returns the cached snapshot, recomputing it once it has expired.
    ///
    /// Fails only when a recomputation is needed and the collection read
    /// fails; the previous snapshot is left in place in that case.
    pub async fn get_stats(&self) -> Result<StatsSnapshot> {
        let mut state = self.state.lock().await;

        let cached = state
            .entry
            .as_ref()
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| entry.value.clone());

        if let Some(snapshot) = cached {
            state.counters.record_hit();
            return Ok(snapshot);
        }

        state.counters.record_miss();
        let records = self.collection.get_all().await?;
        let snapshot = StatsSnapshot::compute(&records, Utc::now());
        debug!(
            total = snapshot.total,
            ttl_secs = self.ttl.as_secs(),
            "Stats snapshot recomputed"
        );

        state.entry = Some(TimedEntry::new(snapshot.clone()));
        state.counters.record_reload();
        Ok(snapshot)
    }

    // == Invalidate ==
    /// Drops the snapshot so the next call recomputes.
    pub async fn invalidate(&self) {
        self.state.lock().await.entry = None;
    }

    pub async fn counters(&self) -> CacheCounters {
        self.state.lock().await.counters
    }
}
