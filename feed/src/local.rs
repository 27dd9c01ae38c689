use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{endpoints, DataSource, Direction, DirectionID, MapData, Route, RouteID, VehiclePositions};

/// Reads the same documents an HTTP server would publish, straight from a directory containing
/// `data/`.
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: String) -> Result<T> {
        let path = self.root.join(path);
        debug!("Reading {}", path.display());
        // fs_err already puts the path in IO errors
        let contents = fs_err::tokio::read_to_string(&path).await?;
        serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }
}

#[async_trait]
impl DataSource for LocalSource {
    async fn list_routes(&self) -> Result<Vec<Route>> {
        self.get_json(endpoints::route_list()).await
    }

    async fn list_directions(&self, route: &RouteID) -> Result<Vec<Direction>> {
        self.get_json(endpoints::directions(route)).await
    }

    async fn load_map_data(&self, route: &RouteID, direction: &DirectionID) -> Result<MapData> {
        let (routes, stops) = tokio::try_join!(
            self.get_json(endpoints::route_geometry(route, direction)),
            self.get_json(endpoints::stop_geometry(route, direction)),
        )?;
        Ok(MapData { routes, stops })
    }

    async fn load_vehicles(&self, route: &RouteID) -> Result<VehiclePositions> {
        self.get_json(endpoints::vehicles(route)).await
    }
}
