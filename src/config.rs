//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Path of the JSON file holding the item collection
    pub data_path: PathBuf,
    /// Lifetime in seconds of a computed stats snapshot
    pub stats_ttl: u64,
    /// Page size used when a list request has no usable `limit`
    pub default_page_limit: usize,
    /// Allowed CORS origin; `*` allows any origin
    pub cors_origin: String,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3001)
    /// - `DATA_PATH` - Item collection file (default: data/items.json)
    /// - `STATS_TTL` - Stats snapshot TTL in seconds (default: 300)
    /// - `DEFAULT_PAGE_LIMIT` - Default page size (default: 20)
    /// - `CORS_ORIGIN` - Allowed origin (default: http://localhost:3000)
    /// - `MAX_BODY_BYTES` - Request body limit (default: 1 MiB)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            data_path: env::var("DATA_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            stats_ttl: env_or("STATS_TTL", defaults.stats_ttl),
            default_page_limit: env_or("DEFAULT_PAGE_LIMIT", defaults.default_page_limit)
                .max(1),
            cors_origin: env::var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            max_body_bytes: env_or("MAX_BODY_BYTES", defaults.max_body_bytes),
        }
    }

    /// Stats snapshot lifetime as a Duration.
    pub fn stats_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.stats_ttl)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3001,
            data_path: PathBuf::from("data/items.json"),
            stats_ttl: 300,
            default_page_limit: 20,
            cors_origin: "http://localhost:3000".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }
}
