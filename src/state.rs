//! Shared application state injected into all handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::config::RedirectPages;
use crate::domain::click_event::ClickEvent;

/// Application state shared across request handlers.
///
/// Cheap to clone: services are behind `Arc`, the click sender is a
/// channel handle. Apart from the click channel there is no shared
/// mutable in-process state; counters live in the database.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub stats_service: Arc<StatsService>,
    pub redirect_service: Arc<RedirectService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Destinations for the not-found / expired / error redirect outcomes.
    pub pages: RedirectPages,
}
