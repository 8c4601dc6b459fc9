//! HTTP boundary to the routing service
//!
//! Wraps the search, route and sample multimodal endpoints. Wire formats are
//! normalized into domain types before anything leaves this module.

use reqwest::{Client, ClientBuilder, Response};

use crate::core::config::ClientConfig;
use crate::core::error::{Error, Result};
use crate::core::model::{
    parse_route_response, GeoPoint, RoutePreferences, RouteRequest, RouteResponse, Suggestion,
    VehicleType, WireSuggestion,
};

/// Client for the routing service endpoints.
///
/// Cheap to clone: clones share one connection pool, so background request
/// tasks each take their own handle.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    search_url: String,
    route_url: String,
    multimodal_url: String,
}

impl ApiClient {
    /// Create a client for the service described by `config`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = ClientBuilder::new()
            .tcp_keepalive(std::time::Duration::from_secs(60))
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("ecoroute-client/{}", env!("ECOROUTE_VERSION")))
            .build()
            .map_err(|e| Error::InvalidInput(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            search_url: config.endpoint("search")?,
            route_url: config.endpoint("route")?,
            multimodal_url: config.endpoint("multimodal-route")?,
        })
    }

    /// Look up location suggestions for a partial address
    pub async fn search(&self, query: &str) -> Result<Vec<Suggestion>> {
        log::debug!("GET {} query={query:?}", self.search_url);
        let response = self
            .http
            .get(&self.search_url)
            .query(&[("query", query)])
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let wire: Vec<WireSuggestion> = response.json().await?;
        Ok(wire.into_iter().map(Suggestion::from).collect())
    }

    /// Request the eco and normal routes between two points
    pub async fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        vehicle: &VehicleType,
        preferences: &RoutePreferences,
    ) -> Result<RouteResponse> {
        let request = RouteRequest {
            start_point: origin.to_lat_lon(),
            end_point: destination.to_lat_lon(),
            vehicle_type: vehicle.as_str(),
            preferences,
        };
        log::debug!(
            "POST {} {origin} -> {destination} ({})",
            self.route_url,
            vehicle.as_str()
        );

        let response = self.http.post(&self.route_url).json(&request).send().await?;
        read_route_response(response).await
    }

    /// Fetch the service's sample multimodal route pair
    pub async fn multimodal_route(&self) -> Result<RouteResponse> {
        log::debug!("GET {}", self.multimodal_url);
        let response = self.http.get(&self.multimodal_url).send().await?;
        read_route_response(response).await
    }
}

/// Turn a non-success response into an `HttpError` carrying the body's detail
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    // An unreadable error body still yields the status-based message
    let body = response.text().await.unwrap_or_default();
    Err(Error::from_status_body(status.as_u16(), &body))
}

async fn read_route_response(response: Response) -> Result<RouteResponse> {
    let response = ensure_success(response).await?;
    let body = response.text().await?;
    parse_route_response(&body)
}
