use serde::Serialize;

use crate::layer::{Layer, LayerId};

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Background tile layer. Tiles are fetched and drawn by the page's map
/// library; the surface only records where they come from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    id: LayerId,
    pub url_template: String,
    pub attribution: String,
}

impl TileLayer {
    pub fn new(id: u64, url_template: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self {
            id: LayerId(id),
            url_template: url_template.into(),
            attribution: attribution.into(),
        }
    }

    pub fn openstreetmap(id: u64) -> Self {
        Self::new(id, OSM_TILE_URL, OSM_ATTRIBUTION)
    }
}

impl Layer for TileLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}
