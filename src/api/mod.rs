//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /api/items` - List items (`q`, `page`, `limit`)
//! - `POST /api/items` - Create an item
//! - `GET /api/items/:id` - Fetch one item
//! - `GET /api/stats` - Summary statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
