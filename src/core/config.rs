//! Client configuration for ecoroute-client
//!
//! Holds the routing service location, timing constants of the search flow and
//! transport timeouts.

use std::time::Duration;

use crate::core::error::{Error, Result};

/// How overlapping search responses for one input are reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrdering {
    /// Drop a response when a newer search for the same input was already applied
    #[default]
    LatestRequest,
    /// Apply whichever response arrives last, regardless of which query it answers
    LastArrival,
}

/// Configuration for the routing service client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the routing service (without the `/api/v1` prefix)
    pub base_url: String,

    /// Quiet period before a search is dispatched
    pub search_debounce: Duration,

    /// Queries shorter than this (in characters) are never sent
    pub min_query_chars: usize,

    /// Overall request timeout enforced by the transport
    pub request_timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Viewport margin applied when fitting the map to a route pair
    pub fit_padding_px: u32,

    /// Stale search response policy
    pub search_ordering: SearchOrdering,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            search_debounce: Duration::from_millis(300),
            min_query_chars: 3,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            fit_padding_px: 50,
            search_ordering: SearchOrdering::default(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at `base_url`, other settings default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Resolve an API path (e.g. `"route"`) to a full URL
    pub fn endpoint(&self, path: &str) -> Result<String> {
        let base = self.base_url.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::InvalidInput(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        Ok(format!("{base}/api/v1/{}", path.trim_start_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.min_query_chars, 3);
        assert_eq!(config.fit_padding_px, 50);
        assert_eq!(config.search_ordering, SearchOrdering::LatestRequest);
    }

    #[test]
    fn test_endpoint_resolution() {
        let config = ClientConfig::with_base_url("http://localhost:8000/");
        assert_eq!(
            config.endpoint("route").unwrap(),
            "http://localhost:8000/api/v1/route"
        );
        assert_eq!(
            config.endpoint("/search").unwrap(),
            "http://localhost:8000/api/v1/search"
        );
    }

    #[test]
    fn test_endpoint_rejects_bad_scheme() {
        let config = ClientConfig::with_base_url("localhost:8000");
        assert!(matches!(config.endpoint("route"), Err(Error::InvalidInput(_))));
    }
}
