#![allow(dead_code)]

//! Shared test scaffolding: in-memory repositories, a stub geolocation
//! resolver, and state construction.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::mpsc;

use linktrack::application::services::{LinkService, RedirectService, StatsService};
use linktrack::config::RedirectPages;
use linktrack::domain::click_event::ClickEvent;
use linktrack::domain::entities::{Click, Link, NewClick, NewLink};
use linktrack::domain::repositories::{ClickFilter, ClickRepository, LinkRepository};
use linktrack::infrastructure::geo::{GeoInfo, GeoResolver};
use linktrack::{AppError, AppState};

/// In-memory link store. `fail_lookups` simulates an unreachable store
/// for the error-redirect path.
#[derive(Default)]
pub struct InMemoryLinks {
    links: Mutex<Vec<Link>>,
    next_id: AtomicI64,
    pub fail_lookups: AtomicBool,
}

impl InMemoryLinks {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    pub fn insert(&self, code: &str, long_url: &str, expires_at: Option<DateTime<Utc>>) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.links.lock().unwrap().push(Link {
            id,
            code: code.to_string(),
            long_url: long_url.to_string(),
            title: None,
            expires_at,
            total_clicks: 0,
            unique_clicks: 0,
            last_clicked_at: None,
            created_at: Utc::now(),
        });
        id
    }

    pub fn insert_titled(&self, code: &str, long_url: &str, title: &str) -> i64 {
        let id = self.insert(code, long_url, None);
        let mut links = self.links.lock().unwrap();
        if let Some(link) = links.iter_mut().find(|l| l.id == id) {
            link.title = Some(title.to_string());
        }
        id
    }

    pub fn get(&self, code: &str) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.code == code)
            .cloned()
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            Err(AppError::internal("Database error", json!({})))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinks {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.check_available()?;

        if self.get(&new_link.code).is_some() {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "code": new_link.code }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let link = Link {
            id,
            code: new_link.code,
            long_url: new_link.long_url,
            title: new_link.title,
            expires_at: new_link.expires_at,
            total_clicks: 0,
            unique_clicks: 0,
            last_clicked_at: None,
            created_at: Utc::now(),
        };
        self.links.lock().unwrap().push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.check_available()?;
        Ok(self.get(code))
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, AppError> {
        self.check_available()?;
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.long_url == long_url)
            .cloned())
    }

    async fn list<'a>(
        &self,
        page: i64,
        page_size: i64,
        search: Option<&'a str>,
    ) -> Result<Vec<Link>, AppError> {
        self.check_available()?;

        let mut links: Vec<Link> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| matches_search(l, search))
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let offset = ((page - 1) * page_size) as usize;
        Ok(links
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect())
    }

    async fn count<'a>(&self, search: Option<&'a str>) -> Result<i64, AppError> {
        self.check_available()?;
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| matches_search(l, search))
            .count() as i64)
    }

    async fn bump_counters(&self, link_id: i64, unique: bool) -> Result<(), AppError> {
        let mut links = self.links.lock().unwrap();
        if let Some(link) = links.iter_mut().find(|l| l.id == link_id) {
            link.total_clicks += 1;
            if unique {
                link.unique_clicks += 1;
            }
            link.last_clicked_at = Some(Utc::now());
        }
        Ok(())
    }
}

fn matches_search(link: &Link, search: Option<&str>) -> bool {
    let Some(term) = search else {
        return true;
    };
    let term = term.to_lowercase();

    link.long_url.to_lowercase().contains(&term)
        || link
            .title
            .as_ref()
            .is_some_and(|t| t.to_lowercase().contains(&term))
}

/// In-memory append-only click store.
#[derive(Default)]
pub struct InMemoryClicks {
    clicks: Mutex<Vec<Click>>,
    next_id: AtomicI64,
    pub fail_writes: AtomicBool,
}

impl InMemoryClicks {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    pub fn all(&self) -> Vec<Click> {
        self.clicks.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClickRepository for InMemoryClicks {
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }

        let click = Click {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            link_id: new_click.link_id,
            clicked_at: Utc::now(),
            ip: new_click.ip,
            user_agent: new_click.user_agent,
            referer: new_click.referer,
            country: new_click.country,
            region: new_click.region,
            city: new_click.city,
            device_type: Some(new_click.device_type),
            browser: Some(new_click.browser),
            os: Some(new_click.os),
        };
        self.clicks.lock().unwrap().push(click.clone());
        Ok(click)
    }

    async fn has_click_from_ip(&self, link_id: i64, ip: &str) -> Result<bool, AppError> {
        Ok(self
            .clicks
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.link_id == link_id && c.ip.as_deref() == Some(ip)))
    }

    async fn list_by_link(
        &self,
        link_id: i64,
        filter: ClickFilter,
    ) -> Result<Vec<Click>, AppError> {
        let mut clicks: Vec<Click> = self
            .clicks
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.link_id == link_id)
            .filter(|c| filter.from_date.is_none_or(|from| c.clicked_at >= from))
            .filter(|c| filter.to_date.is_none_or(|to| c.clicked_at <= to))
            .cloned()
            .collect();
        clicks.sort_by(|a, b| b.clicked_at.cmp(&a.clicked_at));

        Ok(clicks
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn count_by_link(
        &self,
        link_id: i64,
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError> {
        Ok(self
            .clicks
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.link_id == link_id)
            .filter(|c| from_date.is_none_or(|from| c.clicked_at >= from))
            .filter(|c| to_date.is_none_or(|to| c.clicked_at <= to))
            .count() as i64)
    }
}

/// Geolocation stub returning a fixed answer.
pub struct StaticGeo(pub Option<GeoInfo>);

#[async_trait]
impl GeoResolver for StaticGeo {
    async fn resolve(&self, _ip: &str) -> Option<GeoInfo> {
        self.0.clone()
    }
}

pub fn sample_geo() -> GeoInfo {
    GeoInfo {
        country: Some("Brazil".to_string()),
        region: Some("São Paulo".to_string()),
        city: Some("Campinas".to_string()),
    }
}

/// Builds application state over in-memory stores. Returns the click
/// queue receiver so tests can observe (or drive) enqueued events.
pub fn create_test_state(
    links: Arc<InMemoryLinks>,
    clicks: Arc<InMemoryClicks>,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let link_service = Arc::new(LinkService::new(
        links.clone(),
        "https://lt.example.com".to_string(),
    ));
    let stats_service = Arc::new(StatsService::new(links.clone(), clicks));
    let redirect_service = Arc::new(RedirectService::new(links, tx.clone()));

    let state = AppState {
        link_service,
        stats_service,
        redirect_service,
        click_sender: tx,
        pages: RedirectPages::default(),
    };

    (state, rx)
}

/// Injects a fixed peer address, standing in for
/// `into_make_service_with_connect_info` in handler tests.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
