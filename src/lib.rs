//! # Ecoroute client library
//!
//! Client-side orchestration for an eco-routing service: debounced location
//! search, the route request lifecycle, and consistent map-layer state for an
//! eco route drawn next to a normal route.
//!
//! The library is headless. The map widget is reached through [`MapSurface`]
//! and every panel is a plain view-model struct, so any front end (terminal,
//! GUI, web) can render the state.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use ecoroute_client::{App, ClientConfig, Event, MemoryMap, Slot};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (mut app, mut rx) = App::new(ClientConfig::default(), MemoryMap::new())?;
//! let ui = app.sender();
//!
//! ui.send(Event::InputChanged { slot: Slot::Origin, query: "New Delhi".into() })?;
//! // ... the user picks suggestions and submits ...
//! ui.send(Event::Submit)?;
//! ui.send(Event::Shutdown)?;
//!
//! app.run(&mut rx).await;
//! println!("{:?}", app.results().results());
//! # Ok(())
//! # }
//! ```
//!
//! ## One-off requests
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let suggestions = ecoroute_client::search("http://127.0.0.1:8000", "Chandigarh").await?;
//! for s in suggestions {
//!     println!("{} {}", s.display_address, s.position);
//! }
//! # Ok(())
//! # }
//! ```

pub use crate::core::controller::{SubmitAffordance, BUSY_LABEL, IDLE_LABEL};
pub use crate::core::error::{Error, Result};
pub use crate::core::event::{Event, EventSender};
pub use crate::core::layers::{
    Bounds, Layer, LayerId, LineStyle, MapLayerManager, MapSurface, MarkerIcon, MemoryMap,
    RenderedRouteLayers, ECO_LINE, NORMAL_LINE,
};
pub use crate::core::model::{
    transpose_lon_lat, ComparisonResult, GeoPoint, PreferenceSlider, RequestLifecycleState,
    RoutePreferences, RouteResponse, RouteResult, SelectionState, Slot, Suggestion, VehicleType,
};
pub use crate::core::notify::{Category, Notification, NotificationPresenter};
pub use crate::core::present::{ComparisonView, ResultPresenter, ResultsView};
pub use crate::core::debounce::Debouncer;
pub use crate::core::suggest::SuggestionStore;

// Internal modules
mod core;

/// Search for location suggestions against the service at `base_url`
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let hits = ecoroute_client::search("http://localhost:8000", "Mumbai").await?;
/// println!("{} suggestions", hits.len());
/// # Ok(())
/// # }
/// ```
pub async fn search(base_url: &str, query: &str) -> Result<Vec<Suggestion>> {
    let client = ApiClient::new(&ClientConfig::with_base_url(base_url))?;
    client.search(query).await
}

/// Request an eco/normal route pair between two points
///
/// # Arguments
/// * `base_url` - Routing service location, e.g. `"http://localhost:8000"`
/// * `origin` / `destination` - Endpoints in latitude/longitude
/// * `vehicle` - Street network to route on
/// * `preferences` - Weights sent verbatim to the service
pub async fn route(
    base_url: &str,
    origin: GeoPoint,
    destination: GeoPoint,
    vehicle: &VehicleType,
    preferences: &RoutePreferences,
) -> Result<RouteResponse> {
    let client = ApiClient::new(&ClientConfig::with_base_url(base_url))?;
    client.route(origin, destination, vehicle, preferences).await
}

/// Advanced API: the typed client and its configuration
///
/// # Examples
/// ```rust,no_run
/// use ecoroute_client::{ApiClient, ClientConfig, SearchOrdering};
/// use std::time::Duration;
///
/// let config = ClientConfig {
///     base_url: "https://routing.example.org".to_string(),
///     request_timeout: Duration::from_secs(60),
///     search_ordering: SearchOrdering::LastArrival,
///     ..Default::default()
/// };
/// let client = ApiClient::new(&config)?;
/// # Ok::<(), ecoroute_client::Error>(())
/// ```
pub use crate::core::{ApiClient, App, ClientConfig, SearchOrdering};
