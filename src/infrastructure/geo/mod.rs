//! Best-effort geolocation enrichment.
//!
//! Lookups are an optional analytics enrichment: every failure mode
//! (unreachable service, non-success status, malformed body, timeout)
//! degrades to `None` and must never delay or fail the caller.

pub mod ip_api;

pub use ip_api::IpApiResolver;

use async_trait::async_trait;

/// Coarse location for a client address.
///
/// Produced by exactly one successful lookup; individual fields may be
/// absent when the service does not know them, but a `GeoInfo` is never
/// assembled from partial lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoInfo {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
}

/// Geolocation lookup capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoResolver: Send + Sync {
    /// Resolves a client address to a coarse location, or `None` on any
    /// failure. Bounded by the implementation's request timeout.
    async fn resolve(&self, ip: &str) -> Option<GeoInfo>;
}

/// Resolver that always returns `None`. Used when geolocation is
/// disabled by configuration.
pub struct NullGeoResolver;

#[async_trait]
impl GeoResolver for NullGeoResolver {
    async fn resolve(&self, _ip: &str) -> Option<GeoInfo> {
        None
    }
}
