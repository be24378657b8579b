//! Wire format of the vehicle-position feed.
//!
//! The feed is GTFS-realtime rendered as JSON with camelCase keys:
//!
//! ```text
//! { "entity": [ { "vehicle": { "trip": { "routeId": 3, "directionId": 0 },
//!                              "position": { "latitude": 44.65, "longitude": -63.59,
//!                                            "bearing": 90 } } } ] }
//! ```
//!
//! Only the fields the map needs are modelled; anything else is ignored.
//! Fields that are only read for vehicles on a mapped route (position and
//! direction) are optional here and checked after route filtering.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::FetchError;

#[derive(Debug, Clone, Deserialize)]
pub struct FeedMessage {
    pub entity: Vec<FeedEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedEntity {
    pub vehicle: VehicleEntry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleEntry {
    pub trip: TripDescriptor,
    #[serde(default)]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDescriptor {
    #[serde(default)]
    pub route_id: Option<RouteId>,
    #[serde(default)]
    pub direction_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Degrees clockwise from north. GTFS-realtime leaves it unset for
    /// stationary vehicles.
    #[serde(default)]
    pub bearing: Option<f64>,
}

/// Route identifier as published.
///
/// Most agencies publish plain numbers, some publish them as strings
/// (`"7"`), and some use names such as `"9A"` or `"ferry"`. Serializes back
/// to exactly the JSON value it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteId {
    Number(Number),
    Text(String),
}

impl RouteId {
    /// The integral route number, if the id is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            RouteId::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            RouteId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<i64> for RouteId {
    fn from(n: i64) -> Self {
        RouteId::Number(n.into())
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteId::Number(n) => write!(f, "{n}"),
            RouteId::Text(s) => f.write_str(s),
        }
    }
}

/// Decodes a feed response body.
pub fn parse_feed(body: &[u8]) -> Result<FeedMessage, FetchError> {
    serde_json::from_slice(body)
        .map_err(|e| FetchError::with_source("feed body is not a vehicle feed document", e))
}
