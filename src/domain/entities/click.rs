//! Click entity representing a single resolved redirect.

use chrono::{DateTime, Utc};

/// A click event recorded when a shortened link is accessed.
///
/// Append-only and immutable once written. Geolocation fields are
/// all-or-nothing: either all three come from one successful lookup or
/// all are absent.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub device_type: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
}

/// Input data for recording a new click event.
///
/// `link_id` must reference an existing link; the redirect path
/// short-circuits before the recorder when resolution fails, so this
/// holds by construction. Classification fields are always present
/// (the classifier is total); geolocation fields may all be absent.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub device_type: String,
    pub browser: String,
    pub os: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_click_without_geo() {
        let click = NewClick {
            link_id: 42,
            ip: Some("203.0.113.5".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
            referer: None,
            country: None,
            region: None,
            city: None,
            device_type: "desktop".to_string(),
            browser: "Unknown".to_string(),
            os: "Unknown".to_string(),
        };

        assert_eq!(click.link_id, 42);
        assert!(click.country.is_none());
        assert!(click.region.is_none());
        assert!(click.city.is_none());
    }
}
