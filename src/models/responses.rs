//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies that are not owned
//! by the query engine or the caches.

use serde::Serialize;

use crate::cache::CacheCounters;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Collection cache counters
    pub collection: CacheCounters,
    /// Stats cache counters
    pub stats: CacheCounters,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(collection: CacheCounters, stats: CacheCounters) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            collection,
            stats,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
