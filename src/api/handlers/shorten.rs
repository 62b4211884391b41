//! Handler for the link shortening endpoint.

use axum::{extract::State, Json};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "custom_code": "my-link",          // optional
///   "title": "Example",                // optional
///   "expires_at": "2026-12-31T00:00:00Z"  // optional
/// }
/// ```
///
/// # Behavior
///
/// The URL is normalized before storage. Without a custom code,
/// shortening the same URL twice returns the existing link. A custom
/// code takes precedence over that dedupe: it gets its own link even
/// when the URL is already shortened, and repeating the same code with
/// the same URL returns the existing link.
///
/// # Errors
///
/// Returns 400 for invalid URLs or custom codes, 409 when the custom
/// code already maps to a different URL.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_short_link(
            payload.url,
            payload.custom_code,
            payload.title,
            payload.expires_at,
        )
        .await?;

    let short_url = state.link_service.short_url(&link.code);

    Ok(Json(ShortenResponse {
        code: link.code,
        short_url,
        long_url: link.long_url,
        title: link.title,
        expires_at: link.expires_at,
        created_at: link.created_at,
    }))
}
