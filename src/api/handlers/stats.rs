//! Handler for per-link click statistics.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::api::dto::stats::{ClickItem, StatsQuery, StatsResponse};
use crate::domain::repositories::ClickFilter;
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Returns link metadata with paginated click records.
///
/// # Endpoint
///
/// `GET /api/stats/{code}?page=1&limit=20&from_date=...&to_date=...`
///
/// `filtered_total` counts clicks inside the requested date range;
/// `total_clicks`/`unique_clicks` are the lifetime counters.
///
/// # Errors
///
/// Returns 404 for unknown codes.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let filter = ClickFilter::new((page - 1) * limit, limit)
        .with_date_range(query.from_date, query.to_date);

    let stats = state.stats_service.get_stats_by_code(&code, filter).await?;

    Ok(Json(StatsResponse {
        code: stats.link.code,
        long_url: stats.link.long_url,
        title: stats.link.title,
        total_clicks: stats.link.total_clicks,
        unique_clicks: stats.link.unique_clicks,
        filtered_total: stats.total,
        created_at: stats.link.created_at,
        clicks: stats.items.into_iter().map(ClickItem::from).collect(),
    }))
}
