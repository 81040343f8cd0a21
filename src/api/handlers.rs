//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::cache::{AggregateCache, CollectionCache, StatsSnapshot};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{CreateItemRequest, ErrorResponse, HealthResponse, ListQuery, Record};
use crate::query::{query_page, PageResult};
use crate::store::{JsonFileStore, RecordStore};

/// HTTP-level knobs that do not belong to the caches.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Page size used when a list request has no usable `limit`
    pub default_page_limit: usize,
    /// Allowed CORS origin; `*` allows any origin
    pub cors_origin: String,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ApiSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_page_limit: config.default_page_limit.max(1),
            cors_origin: config.cors_origin.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

/// Application state shared across all handlers.
///
/// Both caches are constructed once here and shared by `Arc`; the stats cache
/// reads through the same collection cache the list endpoints use.
#[derive(Clone)]
pub struct AppState {
    /// Backing record store, used directly only for writes
    pub store: Arc<dyn RecordStore>,
    /// Token-invalidated cache of the full collection
    pub collection: Arc<CollectionCache>,
    /// TTL cache of summary statistics
    pub stats: Arc<AggregateCache>,
    pub settings: ApiSettings,
}

impl AppState {
    /// Creates a new AppState over `store` with default API settings.
    pub fn new(store: Arc<dyn RecordStore>, stats_ttl: Duration) -> Self {
        Self::with_settings(store, stats_ttl, ApiSettings::default())
    }

    pub fn with_settings(
        store: Arc<dyn RecordStore>,
        stats_ttl: Duration,
        settings: ApiSettings,
    ) -> Self {
        let collection = Arc::new(CollectionCache::new(store.clone()));
        let stats = Arc::new(AggregateCache::new(collection.clone(), stats_ttl));
        Self {
            store,
            collection,
            stats,
            settings,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Backs the caches with the JSON file named by `data_path`.
    pub fn from_config(config: &Config) -> Self {
        let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::new(config.data_path.clone()));
        Self::with_settings(store, config.stats_ttl_duration(), ApiSettings::from(config))
    }
}

/// Handler for GET /api/items
///
/// Returns one page of the collection, optionally filtered by `q`.
pub async fn list_items_handler(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<PageResult>> {
    let request = params.to_page_request(state.settings.default_page_limit);
    let records = state.collection.get_all().await?;
    Ok(Json(query_page(&records, &request)))
}

/// Handler for GET /api/items/:id
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>> {
    let id: i64 = id
        .trim()
        .parse()
        .map_err(|_| CatalogError::InvalidRequest("Invalid item ID".to_string()))?;

    let records = state.collection.get_all().await?;
    records
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| CatalogError::NotFound("Item not found".to_string()))
}

/// Handler for POST /api/items
///
/// Validates the shape, appends through the store and returns the stored
/// record. The collection cache picks the write up on its next token probe.
pub async fn create_item_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Record>)> {
    let new = req
        .into_new_record()
        .map_err(CatalogError::InvalidRequest)?;

    let (id, token) = state.store.append(new.clone()).await?;
    info!(id, ?token, "Item created");

    Ok((StatusCode::CREATED, Json(Record::from_new(id, new))))
}

/// Handler for GET /api/stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsSnapshot>> {
    Ok(Json(state.stats.get_stats().await?))
}

/// Handler for GET /health
///
/// Reports liveness plus the counters of both caches.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let collection = state.collection.counters().await;
    let stats = state.stats.counters().await;
    Json(HealthResponse::healthy(collection, stats))
}

/// Fallback for unknown routes.
pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Route not found")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn record(id: i64, name: &str, category: &str, price: f64) -> Record {
        Record {
            id,
            name: name.to_string(),
            category: category.to_string(),
            price,
        }
    }

    fn state_with(records: Vec<Record>) -> (Arc<MemoryStore>, AppState) {
        let store = Arc::new(MemoryStore::with_records(records));
        let state = AppState::new(store.clone(), Duration::from_secs(300));
        (store, state)
    }

    fn list(q: &str, page: &str, limit: &str) -> Query<ListQuery> {
        Query(ListQuery {
            q: Some(q.to_string()),
            page: Some(page.to_string()),
            limit: Some(limit.to_string()),
        })
    }

    #[tokio::test]
    async fn test_list_handler_search() {
        let (_store, state) = state_with(vec![
            record(1, "Laptop Pro", "Electronics", 999.0),
            record(2, "Desk", "Furniture", 150.0),
        ]);

        let Json(page) = list_items_handler(State(state), list("lap", "1", "10"))
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, 1);
    }

    #[tokio::test]
    async fn test_get_item_handler() {
        let (_store, state) = state_with(vec![record(7, "Desk", "Furniture", 150.0)]);

        let Json(item) = get_item_handler(State(state.clone()), Path("7".to_string()))
            .await
            .unwrap();
        assert_eq!(item.name, "Desk");

        let missing = get_item_handler(State(state.clone()), Path("8".to_string())).await;
        assert!(matches!(missing, Err(CatalogError::NotFound(_))));

        let invalid = get_item_handler(State(state), Path("abc".to_string())).await;
        assert!(matches!(invalid, Err(CatalogError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_create_then_read_back() {
        let (_store, state) = state_with(Vec::new());

        let req = CreateItemRequest {
            name: Some("Chair".to_string()),
            category: Some("Furniture".to_string()),
            price: Some(serde_json::json!(49.5)),
        };
        let (status, Json(created)) = create_item_handler(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(item) = get_item_handler(State(state), Path(created.id.to_string()))
            .await
            .unwrap();
        assert_eq!(item, created);
    }

    #[tokio::test]
    async fn test_create_invalid_request() {
        let (store, state) = state_with(Vec::new());

        let req = CreateItemRequest {
            name: Some("Chair".to_string()),
            category: None,
            price: Some(serde_json::json!(1)),
        };
        let result = create_item_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));
        assert_eq!(store.load().await.unwrap().0.len(), 0);
    }

    #[tokio::test]
    async fn test_stats_handler_store_down() {
        let (store, state) = state_with(vec![record(1, "A", "B", 1.0)]);
        store.set_unavailable(true).await;

        let result = stats_handler(State(state)).await;
        assert!(matches!(result, Err(CatalogError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let (_store, state) = state_with(Vec::new());
        let Json(response) = health_handler(State(state)).await;
        assert_eq!(response.status, "healthy");
    }
}
