//! Map layer management
//!
//! The map widget itself sits behind [`MapSurface`]; [`MapLayerManager`] is the
//! only component that adds or removes layers on it, and it keeps at most one
//! rendering of a route pair alive at a time.

use std::collections::BTreeMap;

use crate::core::model::{GeoPoint, RouteResult};

/// Handle for a layer added to a map surface
pub type LayerId = u64;

/// Stroke styling for a polyline
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: &'static str,
    pub weight: u32,
    pub opacity: f64,
    pub dash_array: Option<&'static str>,
}

/// Eco route: prominent solid line
pub const ECO_LINE: LineStyle = LineStyle {
    color: "var(--primary-color)",
    weight: 7,
    opacity: 0.9,
    dash_array: None,
};

/// Normal route: secondary dashed line
pub const NORMAL_LINE: LineStyle = LineStyle {
    color: "var(--secondary-color)",
    weight: 4,
    opacity: 0.7,
    dash_array: Some("5, 10"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Origin,
    Destination,
}

impl MarkerIcon {
    pub fn icon_class(self) -> &'static str {
        match self {
            MarkerIcon::Origin => "fa-map-marker-alt",
            MarkerIcon::Destination => "fa-flag-checkered",
        }
    }
}

/// A drawable map artifact
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Polyline {
        points: Vec<GeoPoint>,
        style: LineStyle,
    },
    Marker {
        position: GeoPoint,
        icon: MarkerIcon,
    },
}

/// Axis-aligned lat/lon bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for no points
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds {
            south: first.latitude,
            west: first.longitude,
            north: first.latitude,
            east: first.longitude,
        };
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: &GeoPoint) {
        self.south = self.south.min(p.latitude);
        self.north = self.north.max(p.latitude);
        self.west = self.west.min(p.longitude);
        self.east = self.east.max(p.longitude);
    }

    pub fn contains(&self, p: &GeoPoint) -> bool {
        (self.south..=self.north).contains(&p.latitude)
            && (self.west..=self.east).contains(&p.longitude)
    }
}

/// Contract of the map widget: add/remove layers and fit the viewport
pub trait MapSurface {
    fn add_layer(&mut self, layer: Layer) -> LayerId;

    /// Returns false when the layer was not on the map
    fn remove_layer(&mut self, id: LayerId) -> bool;

    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32);
}

/// In-memory map surface that records layers and the last viewport fit
#[derive(Debug, Default)]
pub struct MemoryMap {
    next_id: LayerId,
    layers: BTreeMap<LayerId, Layer>,
    viewport: Option<(Bounds, u32)>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn polylines(&self) -> Vec<(&[GeoPoint], &LineStyle)> {
        self.layers
            .values()
            .filter_map(|l| match l {
                Layer::Polyline { points, style } => Some((points.as_slice(), style)),
                Layer::Marker { .. } => None,
            })
            .collect()
    }

    pub fn markers(&self) -> Vec<(GeoPoint, MarkerIcon)> {
        self.layers
            .values()
            .filter_map(|l| match l {
                Layer::Marker { position, icon } => Some((*position, *icon)),
                Layer::Polyline { .. } => None,
            })
            .collect()
    }

    pub fn viewport(&self) -> Option<(Bounds, u32)> {
        self.viewport
    }
}

impl MapSurface for MemoryMap {
    fn add_layer(&mut self, layer: Layer) -> LayerId {
        self.next_id += 1;
        self.layers.insert(self.next_id, layer);
        self.next_id
    }

    fn remove_layer(&mut self, id: LayerId) -> bool {
        self.layers.remove(&id).is_some()
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32) {
        self.viewport = Some((bounds, padding_px));
    }
}

/// Layers currently drawn for one route pair
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderedRouteLayers {
    pub eco_line: Option<LayerId>,
    pub normal_line: Option<LayerId>,
    pub origin_marker: Option<LayerId>,
    pub destination_marker: Option<LayerId>,
}

impl RenderedRouteLayers {
    pub fn is_empty(&self) -> bool {
        self.eco_line.is_none()
            && self.normal_line.is_none()
            && self.origin_marker.is_none()
            && self.destination_marker.is_none()
    }
}

/// Owner of every route artifact on the map
pub struct MapLayerManager<M> {
    surface: M,
    rendered: RenderedRouteLayers,
    padding_px: u32,
}

impl<M: MapSurface> MapLayerManager<M> {
    pub fn new(surface: M, padding_px: u32) -> Self {
        Self {
            surface,
            rendered: RenderedRouteLayers::default(),
            padding_px,
        }
    }

    /// Draw a route pair with its endpoints and fit the viewport to both routes.
    ///
    /// Whatever was drawn before is removed first.
    pub fn render(
        &mut self,
        eco: &RouteResult,
        normal: &RouteResult,
        origin: GeoPoint,
        destination: GeoPoint,
    ) {
        self.clear();

        self.rendered.eco_line = Some(self.surface.add_layer(Layer::Polyline {
            points: eco.geometry.clone(),
            style: ECO_LINE,
        }));
        self.rendered.normal_line = Some(self.surface.add_layer(Layer::Polyline {
            points: normal.geometry.clone(),
            style: NORMAL_LINE,
        }));
        self.rendered.origin_marker = Some(self.surface.add_layer(Layer::Marker {
            position: origin,
            icon: MarkerIcon::Origin,
        }));
        self.rendered.destination_marker = Some(self.surface.add_layer(Layer::Marker {
            position: destination,
            icon: MarkerIcon::Destination,
        }));

        if let Some(bounds) = Bounds::from_points(eco.geometry.iter().chain(&normal.geometry)) {
            self.surface.fit_bounds(bounds, self.padding_px);
        }
    }

    /// Remove every tracked artifact. Safe to call with nothing rendered.
    pub fn clear(&mut self) {
        let rendered = std::mem::take(&mut self.rendered);
        for id in [
            rendered.eco_line,
            rendered.normal_line,
            rendered.origin_marker,
            rendered.destination_marker,
        ]
        .into_iter()
        .flatten()
        {
            if !self.surface.remove_layer(id) {
                log::warn!("Layer {id} was already gone from the map");
            }
        }
    }

    pub fn rendered(&self) -> &RenderedRouteLayers {
        &self.rendered
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(points: &[(f64, f64)]) -> RouteResult {
        RouteResult {
            geometry: points.iter().map(|&(lat, lon)| GeoPoint::new(lat, lon)).collect(),
            distance_km: 1.0,
            duration_minutes: 1.0,
            co2_emissions_kg: 1.0,
            eco_score: None,
        }
    }

    #[test]
    fn test_render_draws_one_of_each() {
        let mut manager = MapLayerManager::new(MemoryMap::new(), 50);
        let eco = route(&[(28.6, 77.2), (12.9, 77.5)]);
        let normal = route(&[(28.6, 77.2), (19.0, 72.8)]);

        manager.render(&eco, &normal, GeoPoint::new(28.6, 77.2), GeoPoint::new(12.9, 77.5));

        let map = manager.surface();
        assert_eq!(map.layer_count(), 4);

        let lines = map.polylines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().any(|(_, s)| **s == ECO_LINE));
        assert!(lines.iter().any(|(_, s)| s.dash_array == Some("5, 10")));

        let markers = map.markers();
        assert_eq!(markers.len(), 2);
        assert!(markers.contains(&(GeoPoint::new(28.6, 77.2), MarkerIcon::Origin)));
        assert!(markers.contains(&(GeoPoint::new(12.9, 77.5), MarkerIcon::Destination)));
    }

    #[test]
    fn test_viewport_covers_both_routes() {
        let mut manager = MapLayerManager::new(MemoryMap::new(), 50);
        let eco = route(&[(28.6, 77.2), (12.9, 77.5)]);
        let normal = route(&[(28.6, 77.2), (19.0, 72.8)]);

        manager.render(&eco, &normal, GeoPoint::new(28.6, 77.2), GeoPoint::new(12.9, 77.5));

        let (bounds, padding) = manager.surface().viewport().unwrap();
        assert_eq!(padding, 50);
        assert_eq!(
            bounds,
            Bounds { south: 12.9, west: 72.8, north: 28.6, east: 77.5 }
        );
        for p in eco.geometry.iter().chain(&normal.geometry) {
            assert!(bounds.contains(p));
        }
    }

    #[test]
    fn test_repeated_renders_never_accumulate() {
        let mut manager = MapLayerManager::new(MemoryMap::new(), 50);
        let eco = route(&[(1.0, 1.0), (2.0, 2.0)]);
        let normal = route(&[(1.0, 1.0), (3.0, 3.0)]);

        for _ in 0..5 {
            manager.render(&eco, &normal, GeoPoint::new(1.0, 1.0), GeoPoint::new(2.0, 2.0));
            assert_eq!(manager.surface().layer_count(), 4);
        }
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut manager = MapLayerManager::new(MemoryMap::new(), 50);
        manager.clear();
        assert!(manager.rendered().is_empty());

        let eco = route(&[(1.0, 1.0)]);
        manager.render(&eco, &eco, GeoPoint::new(1.0, 1.0), GeoPoint::new(1.0, 1.0));
        manager.clear();
        manager.clear();

        assert_eq!(manager.surface().layer_count(), 0);
        assert!(manager.rendered().is_empty());
    }
}
