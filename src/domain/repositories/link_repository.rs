//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// The redirect path uses [`find_by_code`](LinkRepository::find_by_code)
/// and [`bump_counters`](LinkRepository::bump_counters); the rest serves
/// the CRUD surface.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - Test mocks via `mockall`, in-memory fakes in integration tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists,
    /// [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code. Exact match only.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its normalized long URL, for deduplication.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, AppError>;

    /// Lists links newest-first with pagination. `page` is 1-indexed.
    /// `search` filters by case-insensitive substring on title or long URL.
    async fn list<'a>(
        &self,
        page: i64,
        page_size: i64,
        search: Option<&'a str>,
    ) -> Result<Vec<Link>, AppError>;

    /// Counts links matching the same `search` filter as
    /// [`list`](LinkRepository::list); `None` counts everything.
    async fn count<'a>(&self, search: Option<&'a str>) -> Result<i64, AppError>;

    /// Atomically increments the link's click counters.
    ///
    /// `total_clicks` always increases by one; `unique_clicks` only when
    /// `unique` is true. Also stamps `last_clicked_at`. The increment is
    /// a single `UPDATE` issued by the store, so concurrent clicks on the
    /// same link never conflict.
    async fn bump_counters(&self, link_id: i64, unique: bool) -> Result<(), AppError>;
}
