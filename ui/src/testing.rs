//! Fakes standing in for the map widget, the pickers and the published data.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use geom::GPSBounds;

use feed::{DataSource, Direction, DirectionID, MapData, Route, RouteID, VehiclePositions};

use crate::map::{
    Cursor, FitOptions, LayerSpec, MapHandle, Popup, ROUTES_SOURCE, STOPS_SOURCE, VEHICLES_SOURCE,
};
use crate::selection::SelectionUi;

pub fn point_feature(lon: f64, lat: f64, properties: serde_json::Value) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![lon, lat]))),
        id: None,
        properties: properties.as_object().cloned(),
        foreign_members: None,
    }
}

pub fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Lets spawned timer tasks catch up with the paused clock
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

/// Shared, ordered record of what the fake source and the fake pickers saw
pub type Journal = Arc<Mutex<Vec<String>>>;

pub struct FakeSource {
    routes: Vec<Route>,
    directions: BTreeMap<RouteID, Vec<Direction>>,
    journal: Journal,
    fail_routes: AtomicBool,
    fail_vehicles: AtomicBool,
    vehicle_fetches: AtomicUsize,
    map_loads: Mutex<Vec<(RouteID, DirectionID)>>,
    map_delay: Mutex<Duration>,
    vehicle_delay: Mutex<Duration>,
}

impl FakeSource {
    /// 501 has one direction, 504 has two, 999 has none
    pub fn toronto() -> Self {
        let direction = |id: &str, name: &str| Direction {
            direction_id: DirectionID::new(id),
            trip_name: name.to_string(),
        };
        let mut directions = BTreeMap::new();
        directions.insert(RouteID::new("501"), vec![direction("0", "Eastbound")]);
        directions.insert(
            RouteID::new("504"),
            vec![direction("0", "Eastbound"), direction("1", "Westbound")],
        );
        directions.insert(RouteID::new("999"), Vec::new());

        let route = |id: &str, name: &str| Route {
            route_id: RouteID::new(id),
            route_long_name: name.to_string(),
        };
        Self {
            routes: vec![
                route("501", "Queen"),
                route("504", "King"),
                route("999", "Ghost"),
            ],
            directions,
            journal: Arc::new(Mutex::new(Vec::new())),
            fail_routes: AtomicBool::new(false),
            fail_vehicles: AtomicBool::new(false),
            vehicle_fetches: AtomicUsize::new(0),
            map_loads: Mutex::new(Vec::new()),
            map_delay: Mutex::new(Duration::ZERO),
            vehicle_delay: Mutex::new(Duration::ZERO),
        }
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    pub fn set_routes_failing(&self, fail: bool) {
        self.fail_routes.store(fail, Ordering::SeqCst);
    }

    pub fn set_vehicles_failing(&self, fail: bool) {
        self.fail_vehicles.store(fail, Ordering::SeqCst);
    }

    /// Map data answers only after this long
    pub fn set_map_delay(&self, delay: Duration) {
        *self.map_delay.lock().unwrap() = delay;
    }

    pub fn set_vehicle_delay(&self, delay: Duration) {
        *self.vehicle_delay.lock().unwrap() = delay;
    }

    pub fn vehicle_fetches(&self) -> usize {
        self.vehicle_fetches.load(Ordering::SeqCst)
    }

    pub fn map_loads(&self) -> Vec<(RouteID, DirectionID)> {
        self.map_loads.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.journal.lock().unwrap().push(entry);
    }
}

async fn wait(delay: &Mutex<Duration>) {
    let delay = *delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl DataSource for FakeSource {
    async fn list_routes(&self) -> Result<Vec<Route>> {
        self.record("source: routes".to_string());
        if self.fail_routes.load(Ordering::SeqCst) {
            bail!("route list unreachable");
        }
        Ok(self.routes.clone())
    }

    async fn list_directions(&self, route: &RouteID) -> Result<Vec<Direction>> {
        self.record(format!("source: directions {route}"));
        match self.directions.get(route) {
            Some(list) => Ok(list.clone()),
            None => bail!("no directions for {route}"),
        }
    }

    async fn load_map_data(&self, route: &RouteID, direction: &DirectionID) -> Result<MapData> {
        self.record(format!("source: map {route}-{direction}"));
        self.map_loads
            .lock()
            .unwrap()
            .push((route.clone(), direction.clone()));
        wait(&self.map_delay).await;
        let line = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(vec![
                vec![-79.5, 43.6],
                vec![-79.3, 43.7],
            ]))),
            id: None,
            properties: serde_json::json!({"route_color": "#e74c3c"})
                .as_object()
                .cloned(),
            foreign_members: None,
        };
        Ok(MapData {
            routes: collection(vec![line]),
            stops: collection(vec![
                point_feature(f64::NAN, 43.7, serde_json::json!({"stop_id": "bad"})),
                point_feature(-79.5, 43.6, serde_json::json!({"stop_id": "1"})),
                point_feature(-79.3, 43.7, serde_json::json!({"stop_id": "2"})),
            ]),
        })
    }

    /// The Nth fetch returns N vehicles, even if a previous one failed
    async fn load_vehicles(&self, route: &RouteID) -> Result<VehiclePositions> {
        let n = self.vehicle_fetches.fetch_add(1, Ordering::SeqCst) + 1;
        self.record(format!("source: vehicles {route}"));
        wait(&self.vehicle_delay).await;
        if self.fail_vehicles.load(Ordering::SeqCst) {
            bail!("vehicle feed down");
        }
        Ok(collection(
            (0..n)
                .map(|i| {
                    point_feature(
                        -79.4,
                        43.65,
                        serde_json::json!({"vehicle_id": format!("{route}-{i}"), "arrow_bearing": 90}),
                    )
                })
                .collect(),
        ))
    }
}

#[derive(Default)]
pub struct MapState {
    pub images: Vec<String>,
    pub sources: BTreeMap<String, FeatureCollection>,
    pub layers: Vec<String>,
    pub fits: Vec<(f64, f64, f64, f64)>,
    pub popups: Vec<Popup>,
    pub cursors: Vec<Cursor>,
}

#[derive(Default)]
pub struct FakeMap {
    state: Mutex<MapState>,
    fail_images: AtomicBool,
}

impl FakeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sources() -> Self {
        let map = Self::new();
        for source in [ROUTES_SOURCE, STOPS_SOURCE, VEHICLES_SOURCE] {
            map.add_source(source).unwrap();
        }
        map
    }

    pub fn fail_images(&self) {
        self.fail_images.store(true, Ordering::SeqCst);
    }

    pub fn state(&self) -> MutexGuard<MapState> {
        self.state.lock().unwrap()
    }

    pub fn feature_count(&self, source: &str) -> usize {
        self.state().sources[source].features.len()
    }

    pub fn vehicle_count(&self) -> usize {
        self.feature_count(VEHICLES_SOURCE)
    }
}

impl MapHandle for FakeMap {
    fn add_image(&self, name: &str, _path: &str) -> Result<()> {
        if self.fail_images.load(Ordering::SeqCst) {
            bail!("no such image");
        }
        self.state().images.push(name.to_string());
        Ok(())
    }

    fn add_source(&self, name: &str) -> Result<()> {
        self.state()
            .sources
            .insert(name.to_string(), feed::empty_collection());
        Ok(())
    }

    fn add_layer(&self, layer: &LayerSpec) -> Result<()> {
        let mut state = self.state();
        if !state.sources.contains_key(layer.source) {
            bail!("{} reads unknown source {}", layer.id, layer.source);
        }
        state.layers.push(layer.id.to_string());
        Ok(())
    }

    fn set_data(&self, source: &str, data: FeatureCollection) -> Result<()> {
        match self.state().sources.get_mut(source) {
            Some(existing) => {
                *existing = data;
                Ok(())
            }
            None => bail!("unknown source {source}"),
        }
    }

    fn fit_bounds(&self, bounds: &GPSBounds, _opts: FitOptions) {
        self.state().fits.push((
            bounds.min_lon,
            bounds.min_lat,
            bounds.max_lon,
            bounds.max_lat,
        ));
    }

    fn show_popup(&self, popup: Popup) {
        self.state().popups.push(popup);
    }

    fn set_cursor(&self, cursor: Cursor) {
        self.state().cursors.push(cursor);
    }
}

#[derive(Default)]
pub struct PickerState {
    pub routes: Vec<RouteID>,
    pub directions: Vec<DirectionID>,
    pub enabled: bool,
    pub selected: Option<DirectionID>,
}

pub struct FakeUi {
    pub state: Arc<Mutex<PickerState>>,
    journal: Journal,
}

impl FakeUi {
    pub fn new(journal: Journal) -> Self {
        Self {
            state: Arc::new(Mutex::new(PickerState::default())),
            journal,
        }
    }

    fn record(&self, entry: String) {
        self.journal.lock().unwrap().push(entry);
    }
}

impl SelectionUi for FakeUi {
    fn set_route_options(&self, routes: &[Route]) {
        self.record(format!("ui: {} routes", routes.len()));
        self.state.lock().unwrap().routes = routes.iter().map(|r| r.route_id.clone()).collect();
    }

    fn reset_directions(&self) {
        self.record("ui: reset directions".to_string());
        let mut state = self.state.lock().unwrap();
        state.directions.clear();
        state.selected = None;
        state.enabled = false;
    }

    fn set_direction_options(&self, directions: &[Direction]) {
        self.record(format!("ui: {} directions", directions.len()));
        self.state.lock().unwrap().directions =
            directions.iter().map(|d| d.direction_id.clone()).collect();
    }

    fn set_directions_enabled(&self, enabled: bool) {
        self.record(format!("ui: directions enabled {enabled}"));
        self.state.lock().unwrap().enabled = enabled;
    }

    fn select_direction(&self, direction: &DirectionID) {
        self.record(format!("ui: select {direction}"));
        self.state.lock().unwrap().selected = Some(direction.clone());
    }
}
