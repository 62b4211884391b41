//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its analytics counters.
///
/// The short code is unique and immutable once assigned. Click counters
/// are mutated only by the background click worker, via atomic increments
/// in the store; they are never computed in-process.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub title: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub total_clicks: i64,
    pub unique_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link has passed its expiry time.
    ///
    /// A link without `expires_at` never expires, regardless of age.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
    pub title: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}
