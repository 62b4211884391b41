//! Geolocation resolver backed by an ip-api.com style HTTP endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{GeoInfo, GeoResolver};

/// Request timeout. On expiry the lookup counts as failed, never as a
/// request failure.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP geolocation resolver.
///
/// The endpoint template uses `{ip}` as a placeholder, e.g.
/// `http://ip-api.com/json/{ip}`. The response is expected to be a JSON
/// object with `country`, `regionName`, and `city` fields; bodies with
/// `"status": "fail"` (how ip-api.com reports private or unknown
/// addresses) resolve to `None`.
pub struct IpApiResolver {
    endpoint_template: String,
    client: reqwest::Client,
}

impl IpApiResolver {
    pub fn new(endpoint_template: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            endpoint_template: endpoint_template.into(),
            client,
        }
    }

    fn parse_response(body: &serde_json::Value) -> Option<GeoInfo> {
        if body.get("status").and_then(|s| s.as_str()) == Some("fail") {
            return None;
        }

        Some(GeoInfo {
            country: body.get("country").and_then(|v| v.as_str()).map(String::from),
            region: body
                .get("regionName")
                .and_then(|v| v.as_str())
                .map(String::from),
            city: body.get("city").and_then(|v| v.as_str()).map(String::from),
        })
    }
}

#[async_trait]
impl GeoResolver for IpApiResolver {
    async fn resolve(&self, ip: &str) -> Option<GeoInfo> {
        let url = self.endpoint_template.replace("{ip}", ip);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(ip = %ip, error = %e, "geolocation request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(ip = %ip, status = %response.status(), "geolocation non-success status");
            return None;
        }

        let body: serde_json::Value = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                warn!(ip = %ip, error = %e, "geolocation response parse failed");
                return None;
            }
        };

        Self::parse_response(&body)
    }
}
