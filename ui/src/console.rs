use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::Result;
use geojson::FeatureCollection;
use geom::GPSBounds;

use feed::{Direction, DirectionID, Route};

use crate::map::{Cursor, FitOptions, LayerSpec, MapHandle, Popup};
use crate::selection::SelectionUi;
use crate::settings::InitialView;

/// A map that only logs what it's asked to draw. Useful for watching a feed without a browser.
pub struct ConsoleMap {
    // Source name to number of features
    sources: Mutex<BTreeMap<String, usize>>,
}

impl ConsoleMap {
    pub fn new(view: &InitialView) -> Self {
        info!(
            "Map using {} centered on {}, {} at zoom {}",
            view.style_url, view.lon, view.lat, view.zoom
        );
        Self {
            sources: Mutex::new(BTreeMap::new()),
        }
    }
}

impl MapHandle for ConsoleMap {
    fn add_image(&self, name: &str, path: &str) -> Result<()> {
        debug!("Image {name} from {path}");
        Ok(())
    }

    fn add_source(&self, name: &str) -> Result<()> {
        let mut sources = self.sources.lock().map_err(|_| anyhow!("map state poisoned"))?;
        if sources.insert(name.to_string(), 0).is_some() {
            bail!("Source {name} already exists");
        }
        Ok(())
    }

    fn add_layer(&self, layer: &LayerSpec) -> Result<()> {
        debug!("Layer {}", serde_json::to_string(layer)?);
        Ok(())
    }

    fn set_data(&self, source: &str, data: FeatureCollection) -> Result<()> {
        let mut sources = self.sources.lock().map_err(|_| anyhow!("map state poisoned"))?;
        match sources.get_mut(source) {
            Some(count) => {
                *count = data.features.len();
                info!(
                    "[{}] {source} now has {count} features",
                    chrono::Local::now().format("%H:%M:%S")
                );
                Ok(())
            }
            None => bail!("No source named {source}"),
        }
    }

    fn fit_bounds(&self, bounds: &GPSBounds, opts: FitOptions) {
        info!(
            "Framing ({}, {}) to ({}, {}) with padding {} up to zoom {}",
            bounds.min_lon, bounds.min_lat, bounds.max_lon, bounds.max_lat, opts.padding, opts.max_zoom
        );
    }

    fn show_popup(&self, popup: Popup) {
        info!(
            "Popup at {}, {}: {} {}",
            popup.lon,
            popup.lat,
            popup.title,
            popup.lines.join(" / ")
        );
    }

    fn set_cursor(&self, cursor: Cursor) {
        debug!("Cursor {cursor:?}");
    }
}

#[derive(Default)]
pub struct ConsoleSelection;

impl SelectionUi for ConsoleSelection {
    fn set_route_options(&self, routes: &[Route]) {
        for route in routes {
            info!("Route {}", route.label());
        }
    }

    fn reset_directions(&self) {
        debug!("Directions cleared");
    }

    fn set_direction_options(&self, directions: &[Direction]) {
        for dir in directions {
            info!("Direction {}: {}", dir.direction_id, dir.trip_name);
        }
    }

    fn set_directions_enabled(&self, enabled: bool) {
        debug!("Directions enabled: {enabled}");
    }

    fn select_direction(&self, direction: &DirectionID) {
        info!("Showing direction {direction}");
    }
}
