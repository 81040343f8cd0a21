//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    create_item_handler, get_item_handler, health_handler, list_items_handler,
    not_found_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/items` - Paginated, searchable item list
/// - `POST /api/items` - Create an item
/// - `GET /api/items/:id` - Fetch one item
/// - `GET /api/stats` - Cached summary statistics
/// - `GET /health` - Health check with cache counters
///
/// # Middleware
/// - CORS: configured origin, or any origin for `*`
/// - Body limit: `max_body_bytes`
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.cors_origin);
    let body_limit = DefaultBodyLimit::max(state.settings.max_body_bytes);

    Router::new()
        .route("/api/items", get(list_items_handler).post(create_item_handler))
        .route("/api/items/:id", get(get_item_handler))
        .route("/api/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origin.trim() == "*" {
        return layer.allow_origin(Any);
    }

    match origin.trim().parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(e) => {
            warn!(origin, error = %e, "Ignoring unparseable CORS origin");
            layer
        }
    }
}
