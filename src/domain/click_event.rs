//! Click event passed from the redirect handler to the background worker.

/// Raw request metadata captured at redirect time.
///
/// Created in the redirect handler after the link has resolved, sent over
/// a bounded channel with `try_send`, and consumed by
/// [`crate::domain::click_worker::run_click_worker`]. Decoupling the
/// channel from the response path is what keeps redirect latency
/// independent of enrichment and persistence.
///
/// Classification and geolocation happen in the worker, not here; the
/// handler only copies headers.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    /// Id of the resolved link. Resolution already succeeded, so this
    /// always references an existing row.
    pub link_id: i64,
    /// Short code, carried for log context only.
    pub code: String,
    pub ip: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClickEvent {
    pub fn new(
        link_id: i64,
        code: String,
        ip: String,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            code,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation() {
        let event = ClickEvent::new(
            42,
            "abc123".to_string(),
            "203.0.113.5".to_string(),
            Some("Mozilla/5.0"),
            Some("https://google.com"),
        );

        assert_eq!(event.link_id, 42);
        assert_eq!(event.code, "abc123");
        assert_eq!(event.ip, "203.0.113.5");
        assert_eq!(event.user_agent, Some("Mozilla/5.0".to_string()));
        assert_eq!(event.referer, Some("https://google.com".to_string()));
    }

    #[test]
    fn test_click_event_minimal_headers() {
        let event = ClickEvent::new(1, "xyz".to_string(), "10.0.0.1".to_string(), None, None);

        assert!(event.user_agent.is_none());
        assert!(event.referer.is_none());
    }
}
