use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use feed::{DataSource, HttpSource, LocalSource};

use crate::map::FitOptions;

#[derive(Clone, Debug)]
pub struct Settings {
    pub data: DataLocation,
    pub poll_interval: Duration,
    pub fit: FitOptions,
    pub initial_view: InitialView,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: DataLocation::Url("http://localhost:8000/".to_string()),
            poll_interval: Duration::from_millis(5000),
            fit: FitOptions {
                padding: 50.0,
                max_zoom: 15.0,
            },
            initial_view: InitialView::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DataLocation {
    Url(String),
    Dir(PathBuf),
}

impl DataLocation {
    pub fn open(&self) -> Result<Arc<dyn DataSource>> {
        let source: Arc<dyn DataSource> = match self {
            DataLocation::Url(url) => Arc::new(HttpSource::new(url)?),
            DataLocation::Dir(path) => Arc::new(LocalSource::new(path.clone())),
        };
        Ok(source)
    }
}

/// Where the map starts before any route is picked
#[derive(Clone, Debug, PartialEq)]
pub struct InitialView {
    pub style_url: String,
    pub lon: f64,
    pub lat: f64,
    pub zoom: f64,
}

impl Default for InitialView {
    fn default() -> Self {
        Self {
            style_url: "https://tiles.openfreemap.org/styles/bright".to_string(),
            lon: -79.4242,
            lat: 43.6993,
            zoom: 11.0,
        }
    }
}
