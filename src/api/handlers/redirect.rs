//! Handler for short URL redirect: the hot path.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{header, HeaderMap},
    response::Redirect,
};
use std::net::SocketAddr;
use tracing::error;

use crate::application::services::RedirectOutcome;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Outcomes
///
/// Every request ends in a 307 redirect:
///
/// - valid code → the link's target URL
/// - unknown code → the configured not-found page
/// - expired code → the configured expired page
/// - storage failure → the configured error page (detail stays in the log)
///
/// # Click Tracking
///
/// For valid codes a click event is pushed onto a bounded channel with
/// `try_send` before the redirect is returned. The response never waits
/// on classification, geolocation, or the database write; a full queue
/// drops the event.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Redirect {
    match state.redirect_service.resolve(&code).await {
        Ok(RedirectOutcome::Target(link)) => {
            let ip = client_ip(&headers, addr);
            let user_agent = headers
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok());
            let referer = headers.get(header::REFERER).and_then(|v| v.to_str().ok());

            state.redirect_service.track(&link, ip, user_agent, referer);

            Redirect::temporary(&link.long_url)
        }
        Ok(RedirectOutcome::NotFound) => Redirect::temporary(&state.pages.not_found),
        Ok(RedirectOutcome::Expired) => Redirect::temporary(&state.pages.expired),
        Err(e) => {
            error!(code = %code, error = %e, "short code resolution failed");
            Redirect::temporary(&state.pages.error)
        }
    }
}
