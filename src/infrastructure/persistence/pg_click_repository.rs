//! PostgreSQL implementation of the click event repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::{ClickFilter, ClickRepository};
use crate::error::AppError;

const CLICK_COLUMNS: &str = "id, link_id, clicked_at, ip, user_agent, referer, \
     country, region, city, device_type, browser, os";

/// PostgreSQL repository for the append-only click event store.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError> {
        let sql = format!(
            "INSERT INTO link_clicks
                 (link_id, ip, user_agent, referer,
                  country, region, city, device_type, browser, os)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {CLICK_COLUMNS}"
        );

        let click = sqlx::query_as::<_, Click>(&sql)
            .bind(new_click.link_id)
            .bind(&new_click.ip)
            .bind(&new_click.user_agent)
            .bind(&new_click.referer)
            .bind(&new_click.country)
            .bind(&new_click.region)
            .bind(&new_click.city)
            .bind(&new_click.device_type)
            .bind(&new_click.browser)
            .bind(&new_click.os)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(click)
    }

    async fn has_click_from_ip(&self, link_id: i64, ip: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM link_clicks WHERE link_id = $1 AND ip = $2)",
        )
        .bind(link_id)
        .bind(ip)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn list_by_link(
        &self,
        link_id: i64,
        filter: ClickFilter,
    ) -> Result<Vec<Click>, AppError> {
        let sql = format!(
            "SELECT {CLICK_COLUMNS} FROM link_clicks
             WHERE link_id = $1
               AND ($2::timestamptz IS NULL OR clicked_at >= $2)
               AND ($3::timestamptz IS NULL OR clicked_at <= $3)
             ORDER BY clicked_at DESC
             LIMIT $4 OFFSET $5"
        );

        let clicks = sqlx::query_as::<_, Click>(&sql)
            .bind(link_id)
            .bind(filter.from_date)
            .bind(filter.to_date)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(clicks)
    }

    async fn count_by_link(
        &self,
        link_id: i64,
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM link_clicks
             WHERE link_id = $1
               AND ($2::timestamptz IS NULL OR clicked_at >= $2)
               AND ($3::timestamptz IS NULL OR clicked_at <= $3)",
        )
        .bind(link_id)
        .bind(from_date)
        .bind(to_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
