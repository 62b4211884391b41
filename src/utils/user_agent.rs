//! User-Agent classification for click analytics.
//!
//! This is an ordered substring heuristic, not a full user-agent parser.
//! The token order is a compatibility contract with existing analytics
//! data: browsers embed each other's tokens (Chrome on Android reports
//! both "Chrome" and "Safari"), and first-match order is what keeps the
//! output stable. Do not reorder the tokens.

/// Coarse client classification derived from a User-Agent string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub device_type: &'static str,
    pub browser: &'static str,
    pub os: &'static str,
}

/// Tokens that classify a device as mobile. `iPad` intentionally matches
/// here before the tablet check.
const MOBILE_TOKENS: &[&str] = &["Mobile", "Android", "iPhone", "iPad"];

/// Browser tokens, tested in order. First match wins.
const BROWSER_TOKENS: &[(&str, &str)] = &[
    ("Chrome", "Chrome"),
    ("Firefox", "Firefox"),
    ("Safari", "Safari"),
    ("Edge", "Edge"),
];

/// OS tokens, tested in order. First match wins.
const OS_TOKENS: &[(&str, &str)] = &[
    ("Windows", "Windows"),
    ("Mac", "macOS"),
    ("Linux", "Linux"),
    ("Android", "Android"),
    ("iOS", "iOS"),
];

/// Classifies a raw User-Agent string into device type, browser, and OS.
///
/// Total function: every input, including the empty string, produces a
/// value. Matching is case-sensitive substring search.
///
/// # Examples
///
/// ```
/// use linktrack::utils::user_agent::classify;
///
/// let info = classify("Mozilla/5.0 (Android) Chrome/91");
/// assert_eq!(info.device_type, "mobile");
/// assert_eq!(info.browser, "Chrome");
/// assert_eq!(info.os, "Android");
/// ```
pub fn classify(user_agent: &str) -> ClientInfo {
    let device_type = if MOBILE_TOKENS.iter().any(|t| user_agent.contains(t)) {
        "mobile"
    } else if user_agent.contains("Tablet") {
        "tablet"
    } else {
        "desktop"
    };

    let browser = BROWSER_TOKENS
        .iter()
        .find(|(token, _)| user_agent.contains(token))
        .map(|(_, name)| *name)
        .unwrap_or("Unknown");

    let os = OS_TOKENS
        .iter()
        .find(|(token, _)| user_agent.contains(token))
        .map(|(_, name)| *name)
        .unwrap_or("Unknown");

    ClientInfo {
        device_type,
        browser,
        os,
    }
}
