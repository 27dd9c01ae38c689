//! Paths of the published JSON documents, relative to wherever the `data/` directory is served.

use crate::{DirectionID, RouteID};

pub fn route_list() -> String {
    "data/route_list.json".to_string()
}

pub fn directions(route: &RouteID) -> String {
    format!("data/directions/{route}.json")
}

pub fn route_geometry(route: &RouteID, direction: &DirectionID) -> String {
    format!("data/map/{route}-{direction}-routes.json")
}

pub fn stop_geometry(route: &RouteID, direction: &DirectionID) -> String {
    format!("data/map/{route}-{direction}-stops.json")
}

pub fn vehicles(route: &RouteID) -> String {
    format!("data/vehicles/{route}.json")
}
