use foundation::{LatLng, LonLat};
use geojson::{Feature, FeatureCollection, JsonValue, Value};
use serde::Serialize;

use crate::layer::{Layer, LayerId};
use crate::symbology::MarkerIcon;

/// One vehicle on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: LatLng,
    /// Clockwise rotation of the icon in degrees, taken from the bearing.
    pub rotation: f64,
    /// Popup content, one plain-text line per entry.
    pub popup: Vec<String>,
}

/// Markers drawn from one feature collection.
///
/// A marker layer is never edited: each refresh builds a new one and the
/// surface swaps it in whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLayer {
    id: LayerId,
    pub icon: MarkerIcon,
    pub markers: Vec<Marker>,
}

impl MarkerLayer {
    /// Turns every point feature into a marker. Features without point
    /// geometry are skipped.
    pub fn from_features(id: LayerId, collection: &FeatureCollection, icon: MarkerIcon) -> Self {
        let markers = collection.features.iter().filter_map(point_marker).collect();
        Self { id, icon, markers }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Layer for MarkerLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}

fn point_marker(feature: &Feature) -> Option<Marker> {
    let geometry = feature.geometry.as_ref()?;
    let Value::Point(position) = &geometry.value else {
        return None;
    };
    // GeoJSON stores [lon, lat]; the map wants lat first.
    let position = LonLat::from_position(position)?.to_lat_lng();

    let rotation = feature
        .property("bearing")
        .and_then(JsonValue::as_f64)
        .unwrap_or(0.0);

    let popup = vec![
        format!("Route: {}", plain_text(feature.property("route"))),
        format!("Direction: {}", plain_text(feature.property("direction"))),
    ];

    Some(Marker {
        position,
        rotation,
        popup,
    })
}

fn plain_text(value: Option<&JsonValue>) -> String {
    match value {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => "unknown".to_string(),
        Some(other) => other.to_string(),
    }
}
