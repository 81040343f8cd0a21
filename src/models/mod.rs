//! Record and DTO models for the catalog API
//!
//! This module defines the catalog record itself plus the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod record;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use record::{NewRecord, Record};
pub use requests::{CreateItemRequest, ListQuery, CREATE_SHAPE_ERROR};
pub use responses::{ErrorResponse, HealthResponse};
