//! Error types for the item catalog
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Failures raised by a record store adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing storage could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data is not a valid record array
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Store refused the operation
    #[error("{0}")]
    Unavailable(String),
}

// == Catalog Error Enum ==
/// Unified error type for the catalog core and its HTTP surface.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Backing store unreadable, malformed, or its metadata probe failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Requested item does not exist
    #[error("{0}")]
    NotFound(String),

    /// Invalid request data
    #[error("{0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        CatalogError::StoreUnavailable(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_maps_to_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CatalogError = StoreError::from(io).into();
        assert!(matches!(err, CatalogError::StoreUnavailable(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (CatalogError::StoreUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (CatalogError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (CatalogError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (CatalogError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_not_found_message_is_bare() {
        let err = CatalogError::NotFound("Item not found".into());
        assert_eq!(err.to_string(), "Item not found");
    }
}
