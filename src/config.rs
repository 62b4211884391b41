//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `DATABASE_URL` - PostgreSQL connection string
//!
//! ## Optional Variables
//!
//! - `BASE_URL` - Public origin for short URLs (default: `http://localhost:3000`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CLICK_QUEUE_CAPACITY` - Click event buffer size (default: 10000, min: 100)
//! - `GEO_API_URL` - Geolocation endpoint template with `{ip}` placeholder
//!   (default: `http://ip-api.com/json/{ip}`; set empty to disable lookups)
//! - `NOT_FOUND_URL` / `EXPIRED_URL` / `ERROR_URL` - Redirect destinations
//!   for the three non-target outcomes (defaults: `/404`, `/expired`, `/error`)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)

use anyhow::{Context, Result};
use std::env;

/// Redirect destinations for the non-target outcomes of the redirect path.
///
/// Relative paths are served by whatever fronts this service; absolute
/// URLs work too.
#[derive(Debug, Clone)]
pub struct RedirectPages {
    pub not_found: String,
    pub expired: String,
    pub error: String,
}

impl Default for RedirectPages {
    fn default() -> Self {
        Self {
            not_found: "/404".to_string(),
            expired: "/expired".to_string(),
            error: "/error".to_string(),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub base_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub click_queue_capacity: usize,
    /// Geolocation endpoint template; `None` disables lookups.
    pub geo_api_url: Option<String>,
    pub pages: RedirectPages,
    pub db_max_connections: u32,
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let click_queue_capacity = env::var("CLICK_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000)
            .max(100);

        let geo_api_url = match env::var("GEO_API_URL") {
            Ok(v) if v.trim().is_empty() => None,
            Ok(v) => Some(v),
            Err(_) => Some("http://ip-api.com/json/{ip}".to_string()),
        };

        let pages = RedirectPages {
            not_found: env::var("NOT_FOUND_URL").unwrap_or_else(|_| "/404".to_string()),
            expired: env::var("EXPIRED_URL").unwrap_or_else(|_| "/expired".to_string()),
            error: env::var("ERROR_URL").unwrap_or_else(|_| "/error".to_string()),
        };

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let db_connect_timeout = env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            base_url,
            listen_addr,
            log_level,
            log_format,
            click_queue_capacity,
            geo_api_url,
            pages,
            db_max_connections,
            db_connect_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_pages_defaults() {
        let pages = RedirectPages::default();
        assert_eq!(pages.not_found, "/404");
        assert_eq!(pages.expired, "/expired");
        assert_eq!(pages.error, "/error");
    }
}
