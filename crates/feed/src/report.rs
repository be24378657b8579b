use std::ops::RangeInclusive;

use foundation::LonLat;
use serde::Serialize;

use crate::error::FetchError;
use crate::protocol::{FeedEntity, FeedMessage, RouteId, parse_feed};

/// Routes drawn on the map.
pub const ROUTE_RANGE: RangeInclusive<i64> = 1..=10;

/// One vehicle's snapshot as taken from the feed. Not retained across refreshes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleReport {
    /// As published, so `"7"` stays a string downstream.
    pub route_id: RouteId,
    pub direction_id: Option<i64>,
    pub position: LonLat,
    pub bearing: f64,
}

pub fn in_route_range(route_id: i64) -> bool {
    ROUTE_RANGE.contains(&route_id)
}

/// Keeps entities on routes in [`ROUTE_RANGE`] and converts them to reports.
///
/// Entities on other routes, or whose route id is not a number, are dropped
/// without error. A kept entity must carry a position; its direction and
/// bearing may be missing.
pub fn select_vehicles(message: FeedMessage) -> Result<Vec<VehicleReport>, FetchError> {
    message
        .entity
        .into_iter()
        .enumerate()
        .filter_map(|(index, entity)| {
            let route_id = entity
                .vehicle
                .trip
                .route_id
                .clone()
                .filter(|id| id.as_number().is_some_and(in_route_range))?;
            Some(to_report(index, route_id, entity))
        })
        .collect()
}

fn to_report(index: usize, route_id: RouteId, entity: FeedEntity) -> Result<VehicleReport, FetchError> {
    let vehicle = entity.vehicle;
    let Some(position) = vehicle.position else {
        return Err(FetchError::new(format!(
            "entity {index} on route {route_id} has no position"
        )));
    };

    Ok(VehicleReport {
        route_id,
        direction_id: vehicle.trip.direction_id,
        position: LonLat::new(position.longitude, position.latitude),
        bearing: position.bearing.unwrap_or(0.0),
    })
}

/// Decodes a response body and selects the mapped vehicles from it.
pub fn decode_vehicles(body: &[u8]) -> Result<Vec<VehicleReport>, FetchError> {
    select_vehicles(parse_feed(body)?)
}
