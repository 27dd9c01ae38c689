use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::{endpoints, DataSource, Direction, DirectionID, MapData, Route, RouteID, VehiclePositions};

/// Fetches everything with plain GETs against a base URL. No timeouts or retries.
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self> {
        let mut base = Url::parse(base).with_context(|| format!("bad data URL {base}"))?;
        // Without the trailing slash, joining would replace the last path segment
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("can't join {path} onto {}", self.base))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: String) -> Result<T> {
        let url = self.url_for(&path)?;
        debug!("GET {url}");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            bail!("GET {url} returned {status}");
        }
        resp.json::<T>()
            .await
            .with_context(|| format!("parsing {url}"))
    }
}

#[async_trait]
impl DataSource for HttpSource {
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
