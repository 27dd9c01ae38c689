#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

pub mod endpoints;
mod http;
mod ids;
mod local;

use anyhow::Result;
use async_trait::async_trait;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

pub use http::HttpSource;
pub use ids::{DirectionID, RouteID};
pub use local::LocalSource;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub route_id: RouteID,
    pub route_long_name: String,
}

impl Route {
    /// What the route picker shows, like "501 - Queen"
    pub fn label(&self) -> String {
        format!("{} - {}", self.route_id, self.route_long_name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub direction_id: DirectionID,
    pub trip_name: String,
}

/// Everything static drawn for one direction of a route.
#[derive(Clone, Debug, PartialEq)]
pub struct MapData {
    /// Line geometry, with an optional `route_color` property
    pub routes: FeatureCollection,
    /// Points with `stop_id` and `stop_name` properties
    pub stops: FeatureCollection,
}

/// Points with `vehicle_id` and `arrow_bearing` properties. Every fetch is a complete snapshot.
pub type VehiclePositions = FeatureCollection;

pub fn empty_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: None,
    }
}

/// Read-only access to the published route data. Nothing is cached or retried; a failed request
/// or a body that doesn't parse is returned as an error.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn list_routes(&self) -> Result<Vec<Route>>;

    async fn list_directions(&self, route: &RouteID) -> Result<Vec<Direction>>;

    /// Route and stop geometry are separate documents. Both must load.
    async fn load_map_data(&self, route: &RouteID, direction: &DirectionID) -> Result<MapData>;

    async fn load_vehicles(&self, route: &RouteID) -> Result<VehiclePositions>;
}
