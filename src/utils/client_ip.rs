//! Client address extraction from forwarding headers.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Resolves the client address for analytics.
///
/// Precedence: first comma-separated entry of `X-Forwarded-For`, then
/// `X-Real-IP`, then the peer socket address. `X-Forwarded-For` ahead of
/// `X-Real-IP` is preserved from the previous implementation of this
/// service; analytics continuity depends on it.
///
/// # Examples
///
/// ```
/// use axum::http::{HeaderMap, HeaderValue};
/// use linktrack::utils::client_ip::client_ip;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.5, 10.0.0.1"));
///
/// let peer = "127.0.0.1:9999".parse().unwrap();
/// assert_eq!(client_ip(&headers, peer), "203.0.113.5");
/// ```
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    peer.ip().to_string()
}
