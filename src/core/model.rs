//! Data model for ecoroute-client
//!
//! Domain types used by the controller and presenters, plus the wire-format
//! structs exchanged with the routing service. Wire structs never leave this
//! module and the API client: they are normalized into domain types here.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// A geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// `[lat, lon]` as sent in route requests
    pub fn to_lat_lon(self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// Convert one route-geometry vertex from the service's `[lon, lat]` order
/// into a `GeoPoint`.
///
/// This is the only place where the coordinate order is swapped.
pub fn transpose_lon_lat(pair: &[f64]) -> Result<GeoPoint> {
    match pair {
        [lon, lat] if lon.is_finite() && lat.is_finite() => Ok(GeoPoint::new(*lat, *lon)),
        [_, _] => Err(Error::MalformedResponse(
            "geometry contains a non-finite coordinate".to_string(),
        )),
        other => Err(Error::MalformedResponse(format!(
            "geometry vertex must have 2 coordinates, got {}",
            other.len()
        ))),
    }
}

/// A candidate location returned by the search endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub display_address: String,
    pub position: GeoPoint,
}

/// Which input field a search or selection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Origin,
    Destination,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Origin => write!(f, "origin"),
            Slot::Destination => write!(f, "destination"),
        }
    }
}

/// Currently chosen origin/destination pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    origin: Option<GeoPoint>,
    destination: Option<GeoPoint>,
}

impl SelectionState {
    pub fn set(&mut self, slot: Slot, point: GeoPoint) {
        match slot {
            Slot::Origin => self.origin = Some(point),
            Slot::Destination => self.destination = Some(point),
        }
    }

    pub fn get(&self, slot: Slot) -> Option<GeoPoint> {
        match slot {
            Slot::Origin => self.origin,
            Slot::Destination => self.destination,
        }
    }

    /// Both endpoints, or `None` while either is unset
    pub fn endpoints(&self) -> Option<(GeoPoint, GeoPoint)> {
        Some((self.origin?, self.destination?))
    }
}

/// Street network the route is computed on
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VehicleType {
    #[default]
    Drive,
    Bike,
    Walk,
    Other(String),
}

impl VehicleType {
    pub fn as_str(&self) -> &str {
        match self {
            VehicleType::Drive => "drive",
            VehicleType::Bike => "bike",
            VehicleType::Walk => "walk",
            VehicleType::Other(name) => name,
        }
    }
}

impl FromStr for VehicleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("vehicle type must not be empty".to_string()));
        }
        Ok(match trimmed.to_lowercase().as_str() {
            "drive" | "car" => VehicleType::Drive,
            "bike" | "bicycle" => VehicleType::Bike,
            "walk" => VehicleType::Walk,
            other => VehicleType::Other(other.to_string()),
        })
    }
}

/// One slider-style preference control with a bounded range
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceSlider {
    pub name: String,
    pub min: f64,
    pub max: f64,
    value: f64,
}

impl PreferenceSlider {
    pub fn new(name: impl Into<String>, min: f64, max: f64, value: f64) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidInput("preference name must not be empty".to_string()));
        }
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(Error::InvalidInput(format!(
                "preference '{name}' has an invalid range {min}..={max}"
            )));
        }
        let mut slider = Self { name, min, max, value: min };
        slider.set(value);
        Ok(slider)
    }

    /// Set the value, clamped into the slider's range. NaN keeps the old value.
    pub fn set(&mut self, value: f64) {
        if !value.is_nan() {
            self.value = value.clamp(self.min, self.max);
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Preference name → weight, as sent to the routing service
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoutePreferences(BTreeMap<String, f64>);

impl RoutePreferences {
    pub fn from_sliders(sliders: &[PreferenceSlider]) -> Self {
        Self(
            sliders
                .iter()
                .map(|s| (s.name.clone(), s.value()))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Statistics and geometry of one computed route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub geometry: Vec<GeoPoint>,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub co2_emissions_kg: f64,
    pub eco_score: Option<u32>,
}

/// Eco vs normal route comparison. Positive time difference means the eco
/// route is slower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonResult {
    pub co2_savings_kg: f64,
    pub time_difference_minutes: f64,
}

/// A validated route response
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    pub eco_route: RouteResult,
    pub normal_route: RouteResult,
    pub comparison: ComparisonResult,
}

/// Coarse phase of the route request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestLifecycleState {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

// --- Wire formats ---

#[derive(Debug, Deserialize)]
pub(crate) struct WirePosition {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireSuggestion {
    address: String,
    position: WirePosition,
}

impl From<WireSuggestion> for Suggestion {
    fn from(wire: WireSuggestion) -> Self {
        Suggestion {
            display_address: wire.address,
            position: GeoPoint::new(wire.position.lat, wire.position.lon),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RouteRequest<'a> {
    pub start_point: [f64; 2],
    pub end_point: [f64; 2],
    pub vehicle_type: &'a str,
    pub preferences: &'a RoutePreferences,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireRoute {
    geometry: Vec<Vec<f64>>,
    distance_km: f64,
    duration_minutes: f64,
    co2_emissions_kg: f64,
    #[serde(default)]
    eco_score: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireComparison {
    co2_savings_kg: f64,
    time_difference_minutes: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireRouteResponse {
    eco_route: WireRoute,
    normal_route: WireRoute,
    comparison: WireComparison,
}

fn finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::MalformedResponse(format!("{name} is not a finite number")))
    }
}

impl WireRoute {
    fn into_route(self, which: &str) -> Result<RouteResult> {
        if self.geometry.is_empty() {
            return Err(Error::MalformedResponse(format!("{which} has an empty geometry")));
        }
        let geometry = self
            .geometry
            .iter()
            .map(|pair| transpose_lon_lat(pair))
            .collect::<Result<Vec<_>>>()?;

        Ok(RouteResult {
            geometry,
            distance_km: finite("distance_km", self.distance_km)?,
            duration_minutes: finite("duration_minutes", self.duration_minutes)?,
            co2_emissions_kg: finite("co2_emissions_kg", self.co2_emissions_kg)?,
            eco_score: self.eco_score,
        })
    }
}

impl TryFrom<WireRouteResponse> for RouteResponse {
    type Error = Error;

    fn try_from(wire: WireRouteResponse) -> Result<Self> {
        Ok(RouteResponse {
            eco_route: wire.eco_route.into_route("eco_route")?,
            normal_route: wire.normal_route.into_route("normal_route")?,
            comparison: ComparisonResult {
                co2_savings_kg: finite("co2_savings_kg", wire.comparison.co2_savings_kg)?,
                time_difference_minutes: finite(
                    "time_difference_minutes",
                    wire.comparison.time_difference_minutes,
                )?,
            },
        })
    }
}

/// Parse and validate a route response body
pub fn parse_route_response(body: &str) -> Result<RouteResponse> {
    let wire: WireRouteResponse = serde_json::from_str(body)?;
    RouteResponse::try_from(wire)
}
