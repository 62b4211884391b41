//! DTOs for the link listing endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Query parameters for link listing.
#[derive(Debug, Deserialize)]
pub struct ListLinksQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Case-insensitive substring filter on title or long URL.
    pub search: Option<String>,
}

/// A single link in the listing.
#[derive(Debug, Serialize)]
pub struct LinkItem {
    pub code: String,
    pub short_url: String,
    pub long_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub total_clicks: i64,
    pub unique_clicks: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_clicked_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl LinkItem {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            code: link.code,
            short_url,
            long_url: link.long_url,
            title: link.title,
            total_clicks: link.total_clicks,
            unique_clicks: link.unique_clicks,
            last_clicked_at: link.last_clicked_at,
            expires_at: link.expires_at,
            created_at: link.created_at,
        }
    }
}

/// Pagination metadata echoed back with every listing.
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Paginated link listing.
#[derive(Debug, Serialize)]
pub struct ListLinksResponse {
    pub data: Vec<LinkItem>,
    pub pagination: Pagination,
}
