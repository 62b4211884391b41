//! DTOs for the per-link statistics endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Click;

/// Query parameters for statistics: pagination plus optional date range.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
}

/// A single click record in the statistics response.
#[derive(Debug, Serialize)]
pub struct ClickItem {
    pub clicked_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
}

impl From<Click> for ClickItem {
    fn from(click: Click) -> Self {
        Self {
            clicked_at: click.clicked_at,
            ip: click.ip,
            referer: click.referer,
            country: click.country,
            region: click.region,
            city: click.city,
            device_type: click.device_type,
            browser: click.browser,
            os: click.os,
        }
    }
}

/// Per-link statistics: link metadata plus paginated click records.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub code: String,
    pub long_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub total_clicks: i64,
    pub unique_clicks: i64,

    /// Clicks matching the requested date range.
    pub filtered_total: i64,

    pub created_at: DateTime<Utc>,
    pub clicks: Vec<ClickItem>,
}
