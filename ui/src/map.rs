use anyhow::Result;
use geojson::FeatureCollection;
use geom::GPSBounds;
use serde::Serialize;

pub const ROUTES_SOURCE: &str = "transit-routes";
pub const STOPS_SOURCE: &str = "transit-stops";
pub const VEHICLES_SOURCE: &str = "transit-vehicles";

/// Everything the viewer needs from the map widget. The widget owns tiles, camera, rendering and
/// hit-testing; the viewer only hands it complete GeoJSON documents per named source.
pub trait MapHandle: Send + Sync {
    fn add_image(&self, name: &str, path: &str) -> Result<()>;
    /// Creates a GeoJSON source holding an empty collection
    fn add_source(&self, name: &str) -> Result<()>;
    fn add_layer(&self, layer: &LayerSpec) -> Result<()>;
    /// Replaces everything in the source. Fails if the source doesn't exist.
    fn set_data(&self, source: &str, data: FeatureCollection) -> Result<()>;
    fn fit_bounds(&self, bounds: &GPSBounds, opts: FitOptions);
    fn show_popup(&self, popup: Popup);
    fn set_cursor(&self, cursor: Cursor);
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: &'static str,
    pub source: &'static str,
    pub style: LayerStyle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerStyle {
    Line {
        /// Per-feature color, used when the feature has it
        color_property: &'static str,
        default_color: &'static str,
        width: f64,
        opacity: f64,
        round_caps: bool,
    },
    Circle {
        radius: f64,
        color: &'static str,
        stroke: Option<Stroke>,
    },
    Symbol {
        icon: &'static str,
        size: f64,
        allow_overlap: bool,
        /// Degrees, read from this property of each feature
        rotate_property: Option<&'static str>,
        offset: [f64; 2],
        align_to_map: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FitOptions {
    pub padding: f64,
    pub max_zoom: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Popup {
    pub lon: f64,
    pub lat: f64,
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
}
