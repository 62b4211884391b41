//! URL normalization for deduplication.
//!
//! Shorten requests are deduplicated by normalized long URL, so two
//! spellings of the same URL must map to the same row.

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Normalizes a URL to a canonical form.
///
/// Lowercases the hostname, strips default ports (80/443) and fragments,
/// and preserves path and query as-is. Rejects any scheme other than
/// `http` and `https` (`javascript:`, `data:` and friends are not
/// shortenable).
///
/// # Errors
///
/// [`UrlNormalizationError::InvalidFormat`] for unparsable input,
/// [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if let Some(host) = url.host_str() {
        let host = host.to_ascii_lowercase();
        url.set_host(Some(&host))
            .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;
    }

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        // set_port only fails for schemes without an authority; http(s)
        // always has one.
        let _ = url.set_port(None);
    }

    Ok(url.to_string())
}
