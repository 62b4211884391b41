//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, code, long_url, title, expires_at, \
     total_clicks, unique_clicks, last_clicked_at, created_at";

/// PostgreSQL repository for short link storage and retrieval.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO short_links (code, long_url, title, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {LINK_COLUMNS}"
        );

        let link = sqlx::query_as::<_, Link>(&sql)
            .bind(&new_link.code)
            .bind(&new_link.long_url)
            .bind(&new_link.title)
            .bind(new_link.expires_at)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM short_links WHERE code = $1");

        let link = sqlx::query_as::<_, Link>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM short_links WHERE long_url = $1
             ORDER BY created_at LIMIT 1"
        );

        let link = sqlx::query_as::<_, Link>(&sql)
            .bind(long_url)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn list<'a>(
        &self,
        page: i64,
        page_size: i64,
        search: Option<&'a str>,
    ) -> Result<Vec<Link>, AppError> {
        let offset = (page - 1) * page_size;

        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM short_links
             WHERE ($3::text IS NULL
                    OR title ILIKE '%' || $3 || '%'
                    OR long_url ILIKE '%' || $3 || '%')
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2"
        );

        let links = sqlx::query_as::<_, Link>(&sql)
            .bind(page_size)
            .bind(offset)
            .bind(search)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(links)
    }

    async fn count<'a>(&self, search: Option<&'a str>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM short_links
             WHERE ($1::text IS NULL
                    OR title ILIKE '%' || $1 || '%'
                    OR long_url ILIKE '%' || $1 || '%')",
        )
        .bind(search)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn bump_counters(&self, link_id: i64, unique: bool) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE short_links
             SET total_clicks = total_clicks + 1,
                 unique_clicks = unique_clicks + CASE WHEN $2 THEN 1 ELSE 0 END,
                 last_clicked_at = now()
             WHERE id = $1",
        )
        .bind(link_id)
        .bind(unique)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
