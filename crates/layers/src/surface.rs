//! Server-side model of the web map.
//!
//! The page mounts a map into a DOM container and mirrors whatever the
//! surface holds: a fixed view, one background tile layer, and the vehicle
//! marker layers. Only the refresh cycle mutates the surface; everyone else
//! reads [`SurfaceSnapshot`]s.

use foundation::LatLng;
use serde::Serialize;

use crate::markers::MarkerLayer;
use crate::raster::TileLayer;
use crate::symbology::MarkerIcon;

/// DOM id of the element the page mounts the map into.
pub const MAP_CONTAINER_ID: &str = "theMap";
/// Downtown Halifax.
pub const HALIFAX_CENTER: LatLng = LatLng::new(44.650627, -63.597140);
pub const DEFAULT_ZOOM: u8 = 14;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl MapView {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(HALIFAX_CENTER, DEFAULT_ZOOM)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceLayer {
    Tiles(TileLayer),
    Markers(MarkerLayer),
}

#[derive(Debug, Clone)]
pub struct MapSurface {
    container: String,
    view: MapView,
    icon: MarkerIcon,
    layers: Vec<SurfaceLayer>,
}

impl MapSurface {
    /// A surface showing `view` with `tiles` as its background.
    pub fn new(
        container: impl Into<String>,
        view: MapView,
        tiles: TileLayer,
        icon: MarkerIcon,
    ) -> Self {
        Self {
            container: container.into(),
            view,
            icon,
            layers: vec![SurfaceLayer::Tiles(tiles)],
        }
    }

    /// Halifax on OpenStreetMap tiles with the bus icon.
    pub fn halifax() -> Self {
        Self::new(
            MAP_CONTAINER_ID,
            MapView::default(),
            TileLayer::openstreetmap(0),
            MarkerIcon::bus(),
        )
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn view(&self) -> MapView {
        self.view
    }

    pub fn icon(&self) -> &MarkerIcon {
        &self.icon
    }

    pub fn layers(&self) -> &[SurfaceLayer] {
        &self.layers
    }

    pub fn tile_layer(&self) -> Option<&TileLayer> {
        self.layers.iter().find_map(|l| match l {
            SurfaceLayer::Tiles(t) => Some(t),
            SurfaceLayer::Markers(_) => None,
        })
    }

    pub fn marker_layers(&self) -> impl Iterator<Item = &MarkerLayer> {
        self.layers.iter().filter_map(|l| match l {
            SurfaceLayer::Markers(m) => Some(m),
            SurfaceLayer::Tiles(_) => None,
        })
    }

    pub fn marker_layer_count(&self) -> usize {
        self.marker_layers().count()
    }

    /// Detaches every marker layer, leaving the background in place.
    /// Returns how many were removed; zero when there were none.
    pub fn remove_marker_layers(&mut self) -> usize {
        let before = self.layers.len();
        self.layers
            .retain(|l| !matches!(l, SurfaceLayer::Markers(_)));
        before - self.layers.len()
    }

    pub fn add_marker_layer(&mut self, layer: MarkerLayer) {
        self.layers.push(SurfaceLayer::Markers(layer));
    }

    pub fn snapshot(&self, generation: u64) -> SurfaceSnapshot {
        SurfaceSnapshot {
            generation,
            container: self.container.clone(),
            view: self.view,
            tile_layer: self.tile_layer().cloned(),
            icon: self.icon.clone(),
            marker_layers: self.marker_layers().cloned().collect(),
        }
    }
}

/// Everything a page needs to draw the surface as of one refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceSnapshot {
    /// Refresh count at the time of the snapshot; newer snapshots have
    /// larger generations.
    pub generation: u64,
    pub container: String,
    pub view: MapView,
    pub tile_layer: Option<TileLayer>,
    pub icon: MarkerIcon,
    pub marker_layers: Vec<MarkerLayer>,
}

#[cfg(test)]
mod tests {
    use super::{HALIFAX_CENTER, MAP_CONTAINER_ID, MapSurface};
    use crate::layer::{Layer, LayerId};
    use crate::markers::MarkerLayer;
    use feed::{RouteId, VehicleReport, feature_collection};
    use foundation::LonLat;
    use serde_json::json;

    fn layer(id: u64) -> MarkerLayer {
        let fc = feature_collection(&[VehicleReport {
            route_id: RouteId::from(1),
            direction_id: Some(0),
            position: LonLat::new(-63.6, 44.6),
            bearing: 180.0,
        }]);
        MarkerLayer::from_features(LayerId(id), &fc, super::MarkerIcon::bus())
    }

    #[test]
    fn starts_with_tiles_and_no_markers() {
        let surface = MapSurface::halifax();
        assert_eq!(surface.container(), MAP_CONTAINER_ID);
        assert_eq!(surface.view().center, HALIFAX_CENTER);
        assert_eq!(surface.view().zoom, 14);
        assert!(surface.tile_layer().is_some());
        assert_eq!(surface.marker_layer_count(), 0);
    }

    #[test]
    fn removing_markers_keeps_tiles() {
        let mut surface = MapSurface::halifax();
        surface.add_marker_layer(layer(1));
        surface.add_marker_layer(layer(2));
        assert_eq!(surface.marker_layer_count(), 2);

        assert_eq!(surface.remove_marker_layers(), 2);
        assert_eq!(surface.marker_layer_count(), 0);
        assert_eq!(surface.layers().len(), 1);
        assert!(surface.tile_layer().is_some());
    }

    #[test]
    fn removing_markers_is_idempotent() {
        let mut surface = MapSurface::halifax();
        assert_eq!(surface.remove_marker_layers(), 0);
        assert_eq!(surface.remove_marker_layers(), 0);
        assert_eq!(surface.layers().len(), 1);
    }

    #[test]
    fn snapshot_serializes_for_the_page() {
        let mut surface = MapSurface::halifax();
        surface.add_marker_layer(layer(5));
        let snap = surface.snapshot(3);
        assert_eq!(snap.marker_layers[0].id(), LayerId(5));

        let v = serde_json::to_value(&snap).expect("serialize");
        assert_eq!(v["generation"], json!(3));
        assert_eq!(v["container"], json!("theMap"));
        assert_eq!(v["view"]["zoom"], json!(14));
        assert_eq!(v["icon"]["anchor"], json!([16, 16]));
        assert_eq!(v["markerLayers"][0]["markers"][0]["rotation"], json!(180.0));
        assert_eq!(
            v["markerLayers"][0]["markers"][0]["position"],
            json!({ "lat": 44.6, "lng": -63.6 })
        );
        assert!(
            v["tileLayer"]["urlTemplate"]
                .as_str()
                .is_some_and(|u| u.contains("openstreetmap"))
        );
    }
}
