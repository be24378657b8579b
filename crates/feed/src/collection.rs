use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use crate::report::VehicleReport;

/// Builds a point feature collection, one feature per report.
///
/// Coordinates are `[longitude, latitude]`; properties are exactly
/// `{ bearing, route, direction }` copied from the report. The route keeps
/// its published JSON type and a missing direction is written as `null`.
pub fn feature_collection(reports: &[VehicleReport]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: reports.iter().map(vehicle_feature).collect(),
        foreign_members: None,
    }
}

pub fn vehicle_feature(report: &VehicleReport) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("bearing".to_string(), json!(report.bearing));
    properties.insert("route".to_string(), json!(report.route_id));
    properties.insert("direction".to_string(), json!(report.direction_id));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(report.position.to_position()))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// An empty collection, served before the first successful refresh.
pub fn empty_collection() -> FeatureCollection {
    feature_collection(&[])
}
