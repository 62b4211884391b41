//! Handler for the link listing endpoint.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::api::dto::links::{LinkItem, ListLinksQuery, ListLinksResponse, Pagination};
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// Lists links newest-first with pagination.
///
/// # Endpoint
///
/// `GET /api/links?page=1&limit=10&search=docs`
///
/// `search` filters by case-insensitive substring on title or long URL.
/// Out-of-range parameters are clamped rather than rejected.
pub async fn links_handler(
    State(state): State<AppState>,
    Query(query): Query<ListLinksQuery>,
) -> Result<Json<ListLinksResponse>, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (links, total) = state.link_service.list_links(page, limit, search).await?;

    let data = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.code);
            LinkItem::from_link(link, short_url)
        })
        .collect();

    Ok(Json(ListLinksResponse {
        data,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: (total + limit - 1) / limit,
        },
    }))
}
