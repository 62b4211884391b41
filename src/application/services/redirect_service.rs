//! Redirect orchestration: resolve a short code, classify the outcome,
//! and hand click tracking off to the background queue.

use std::sync::Arc;

use metrics::counter;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Terminal outcome of resolving a short code.
///
/// All three are final and non-retryable; the handler maps each to a
/// fixed redirect destination. A storage failure during resolution is the
/// only error path and surfaces as `Err` from
/// [`RedirectService::resolve`].
#[derive(Debug)]
pub enum RedirectOutcome {
    /// Valid link; redirect to its target.
    Target(Link),
    /// Unknown short code.
    NotFound,
    /// Known code whose `expires_at` is in the past.
    Expired,
}

/// Orchestrates the hot redirect path.
pub struct RedirectService {
    links: Arc<dyn LinkRepository>,
    click_tx: mpsc::Sender<ClickEvent>,
}

impl RedirectService {
    pub fn new(links: Arc<dyn LinkRepository>, click_tx: mpsc::Sender<ClickEvent>) -> Self {
        Self { links, click_tx }
    }

    /// Resolves a short code to its terminal outcome.
    ///
    /// Exact-match lookup; an expired link is a distinct outcome, not a
    /// missing one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only when the store itself is
    /// unreachable.
    pub async fn resolve(&self, code: &str) -> Result<RedirectOutcome, AppError> {
        let link = match self.links.find_by_code(code).await? {
            Some(link) => link,
            None => return Ok(RedirectOutcome::NotFound),
        };

        if link.is_expired() {
            return Ok(RedirectOutcome::Expired);
        }

        Ok(RedirectOutcome::Target(link))
    }

    /// Enqueues a click event without waiting for it to be processed.
    ///
    /// `try_send` never suspends: if the queue is full or the worker is
    /// gone, the event is dropped and the redirect proceeds unaffected.
    pub fn track(&self, link: &Link, ip: String, user_agent: Option<&str>, referer: Option<&str>) {
        let event = ClickEvent::new(link.id, link.code.clone(), ip, user_agent, referer);

        if let Err(e) = self.click_tx.try_send(event) {
            warn!(code = %link.code, error = %e, "failed to enqueue click event");
            counter!("linktrack_clicks_dropped_total").increment(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::{Duration, Utc};

    fn test_link(expires_at: Option<chrono::DateTime<Utc>>) -> Link {
        Link {
            id: 7,
            code: "abc123".to_string(),
            long_url: "https://example.com".to_string(),
            title: None,
            expires_at,
            total_clicks: 0,
            unique_clicks: 0,
            last_clicked_at: None,
            created_at: Utc::now(),
        }
    }

    fn service(mock: MockLinkRepository) -> (RedirectService, mpsc::Receiver<ClickEvent>) {
        let (tx, rx) = mpsc::channel(4);
        (RedirectService::new(Arc::new(mock), tx), rx)
    }

    #[tokio::test]
    async fn test_resolve_valid_link() {
        let mut mock = MockLinkRepository::new();
        let link = test_link(None);
        mock.expect_find_by_code()
            .withf(|code| code == "abc123")
            .returning(move |_| Ok(Some(link.clone())));

        let (service, _rx) = service(mock);
        let outcome = service.resolve("abc123").await.unwrap();

        match outcome {
            RedirectOutcome::Target(link) => assert_eq!(link.long_url, "https://example.com"),
            other => panic!("expected Target, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_code().returning(|_| Ok(None));

        let (service, _rx) = service(mock);

        assert!(matches!(
            service.resolve("nope").await.unwrap(),
            RedirectOutcome::NotFound
        ));
    }

    #[tokio::test]
    async fn test_resolve_expired_link() {
        let mut mock = MockLinkRepository::new();
        let link = test_link(Some(Utc::now() - Duration::seconds(1)));
        mock.expect_find_by_code()
            .returning(move |_| Ok(Some(link.clone())));

        let (service, _rx) = service(mock);

        assert!(matches!(
            service.resolve("abc123").await.unwrap(),
            RedirectOutcome::Expired
        ));
    }

    #[tokio::test]
    async fn test_track_enqueues_event() {
        let mock = MockLinkRepository::new();
        let (service, mut rx) = service(mock);

        let link = test_link(None);
        service.track(&link, "203.0.113.5".to_string(), Some("Mozilla/5.0"), None);

        let event = rx.try_recv().unwrap();
        assert_eq!(event.link_id, 7);
        assert_eq!(event.code, "abc123");
        assert_eq!(event.ip, "203.0.113.5");
    }

    #[tokio::test]
    async fn test_track_full_queue_drops_silently() {
        let mock = MockLinkRepository::new();
        let (tx, _rx) = mpsc::channel(1);
        let service = RedirectService::new(Arc::new(mock), tx);

        let link = test_link(None);
        service.track(&link, "1.1.1.1".to_string(), None, None);
        // Queue capacity exhausted; the second event is dropped, no panic.
        service.track(&link, "1.1.1.1".to_string(), None, None);
    }
}
