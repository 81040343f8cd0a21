//! Item Cache - A read-through item catalog server
//!
//! Serves filtered, paginated views of an item collection and cached summary
//! statistics, reparsing the backing store only when its freshness token moves.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod store;

pub use api::AppState;
pub use config::Config;
