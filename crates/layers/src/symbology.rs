use serde::Serialize;

/// Image drawn for every vehicle marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcon {
    /// Relative to the page that mounts the map.
    pub url: String,
    /// Width and height in pixels.
    pub size: [u32; 2],
    /// Pixel inside the image that sits on the marker position.
    pub anchor: [u32; 2],
}

impl MarkerIcon {
    /// An icon anchored at the center of the image.
    pub fn centered(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            size: [width, height],
            anchor: [width / 2, height / 2],
        }
    }

    pub fn bus() -> Self {
        Self::centered("./bus.png", 32, 32)
    }
}
