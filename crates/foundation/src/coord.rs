use serde::{Deserialize, Serialize};

/// Position in GeoJSON axis order: longitude first, then latitude (degrees).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `[lon, lat]` as written into a GeoJSON position.
    pub fn to_position(self) -> Vec<f64> {
        vec![self.lon, self.lat]
    }

    /// Reads a GeoJSON position. Extra ordinates (altitude) are ignored.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] => Some(Self::new(*lon, *lat)),
            _ => None,
        }
    }

    pub fn to_lat_lng(self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }
}

/// Position in map-view order: latitude first, then longitude (degrees).
///
/// This is the order web map libraries expect for view centers and markers.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[cfg(test)]
mod tests {
    use super::{LatLng, LonLat};

    #[test]
    fn position_is_lon_first() {
        let p = LonLat::new(-63.59, 44.65);
        assert_eq!(p.to_position(), vec![-63.59, 44.65]);
    }

    #[test]
    fn from_position_ignores_altitude() {
        let p = LonLat::from_position(&[-63.6, 44.6, 12.0]).expect("position");
        assert_eq!(p, LonLat::new(-63.6, 44.6));
        assert!(LonLat::from_position(&[1.0]).is_none());
    }

    #[test]
    fn swaps_into_map_order() {
        let ll = LonLat::new(-63.59, 44.65).to_lat_lng();
        assert_eq!(ll, LatLng::new(44.65, -63.59));
    }
}
