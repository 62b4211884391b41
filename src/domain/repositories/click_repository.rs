//! Repository trait for click events and statistics.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Filter criteria for click queries: optional date range plus pagination.
#[derive(Debug, Clone)]
pub struct ClickFilter {
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    pub offset: i64,
    pub limit: i64,
}

impl ClickFilter {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            from_date: None,
            to_date: None,
            offset,
            limit,
        }
    }

    pub fn with_date_range(
        mut self,
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.from_date = from_date;
        self.to_date = to_date;
        self
    }
}

/// Repository interface for the append-only click event store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL
/// - Test mocks via `mockall`, in-memory fakes in integration tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click event. Inserts are independent and
    /// order-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Callers on the
    /// recording path swallow and log this error.
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Returns true if the link already has a click from this address.
    /// Used to maintain the unique-clicks counter.
    async fn has_click_from_ip(&self, link_id: i64, ip: &str) -> Result<bool, AppError>;

    /// Lists click events for a link, newest first.
    async fn list_by_link(
        &self,
        link_id: i64,
        filter: ClickFilter,
    ) -> Result<Vec<Click>, AppError>;

    /// Counts click events for a link within an optional date range.
    async fn count_by_link(
        &self,
        link_id: i64,
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError>;
}
