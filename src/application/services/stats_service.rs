//! Click statistics service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Click, Link};
use crate::domain::repositories::{ClickFilter, ClickRepository, LinkRepository};
use crate::error::AppError;

/// Link metadata combined with its paginated click records.
#[derive(Debug, Clone)]
pub struct DetailedStats {
    pub link: Link,
    pub total: i64,
    pub items: Vec<Click>,
}

/// Service for retrieving per-link click statistics.
pub struct StatsService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
}

impl StatsService {
    pub fn new(links: Arc<dyn LinkRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { links, clicks }
    }

    /// Retrieves detailed statistics for a short code.
    ///
    /// The total respects the filter's date range; the items respect its
    /// pagination as well.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes.
    pub async fn get_stats_by_code(
        &self,
        code: &str,
        filter: ClickFilter,
    ) -> Result<DetailedStats, AppError> {
        let link = self.links.find_by_code(code).await?.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })?;

        let total = self
            .clicks
            .count_by_link(link.id, filter.from_date, filter.to_date)
            .await?;

        let items = self.clicks.list_by_link(link.id, filter).await?;

        Ok(DetailedStats { link, total, items })
    }
}
