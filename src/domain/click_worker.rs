//! Background worker draining the click event queue.
//!
//! Runs detached from request handlers: the redirect response is already
//! on the wire by the time an event is processed here. Every failure on
//! this path is logged and swallowed; a failed enrichment or write is a
//! less complete analytics row, never a user-facing error.

use std::sync::Arc;

use metrics::counter;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::infrastructure::geo::GeoResolver;
use crate::utils::user_agent::classify;

/// Drains the click queue until every sender is dropped.
///
/// Per event: classify the User-Agent (synchronous, total), resolve
/// geolocation (best-effort, bounded by the resolver's timeout), append
/// the click row, then atomically bump the link's counters.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    clicks: Arc<dyn ClickRepository>,
    links: Arc<dyn LinkRepository>,
    geo: Arc<dyn GeoResolver>,
) {
    while let Some(event) = rx.recv().await {
        process_event(event, clicks.as_ref(), links.as_ref(), geo.as_ref()).await;
    }

    info!("click queue closed, worker exiting");
}

async fn process_event(
    event: ClickEvent,
    clicks: &dyn ClickRepository,
    links: &dyn LinkRepository,
    geo: &dyn GeoResolver,
) {
    let client = classify(event.user_agent.as_deref().unwrap_or(""));

    let geo_info = geo.resolve(&event.ip).await;
    if geo_info.is_none() {
        counter!("linktrack_geo_lookup_misses_total").increment(1);
    }
    let geo_info = geo_info.unwrap_or_default();

    // First click from this address counts toward unique_clicks. The
    // check and the insert are not transactional; a race costs at most
    // one extra unique count.
    let unique = match clicks.has_click_from_ip(event.link_id, &event.ip).await {
        Ok(seen) => !seen,
        Err(e) => {
            warn!(code = %event.code, error = %e, "unique-click check failed");
            false
        }
    };

    let new_click = NewClick {
        link_id: event.link_id,
        ip: Some(event.ip),
        user_agent: event.user_agent,
        referer: event.referer,
        country: geo_info.country,
        region: geo_info.region,
        city: geo_info.city,
        device_type: client.device_type.to_string(),
        browser: client.browser.to_string(),
        os: client.os.to_string(),
    };

    if let Err(e) = clicks.record(new_click).await {
        warn!(code = %event.code, error = %e, "failed to persist click event");
        counter!("linktrack_clicks_failed_total").increment(1);
        return;
    }

    if let Err(e) = links.bump_counters(event.link_id, unique).await {
        warn!(code = %event.code, error = %e, "failed to bump click counters");
    }

    counter!("linktrack_clicks_recorded_total").increment(1);
}
