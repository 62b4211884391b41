//! API route configuration.

use crate::api::handlers::{links_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Routes nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`      - Create a shortened URL
/// - `GET  /links`        - Paginated link listing
/// - `GET  /stats/{code}` - Per-link click statistics
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/links", get(links_handler))
        .route("/stats/{code}", get(stats_handler))
}
