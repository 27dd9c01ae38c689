use std::sync::Arc;

use anyhow::{Context, Result};
use futures_util::{Stream, StreamExt};

use feed::{DataSource, DirectionID, RouteID};

use crate::map::{MapHandle, ROUTES_SOURCE, STOPS_SOURCE, VEHICLES_SOURCE};
use crate::poller::VehiclePoller;
use crate::selection::{SelectionUi, UiEvent};
use crate::settings::Settings;
use crate::{bounds, interactions, layers};

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Idle,
    /// Directions are loading or loaded, nothing drawn for this route yet
    RouteSelected(RouteID),
    /// Geometry is drawn and vehicles are polling
    Active {
        route: RouteID,
        direction: DirectionID,
    },
}

impl Selection {
    pub fn route(&self) -> Option<&RouteID> {
        match self {
            Selection::Idle => None,
            Selection::RouteSelected(route) => Some(route),
            Selection::Active { route, .. } => Some(route),
        }
    }
}

/// Ties the route and direction pickers to what the map shows.
///
/// Only one selection loads at a time. Map interactions never wait on the data source, and the
/// vehicle poller is the only thing running in the background.
pub struct Controller {
    source: Arc<dyn DataSource>,
    map: Arc<dyn MapHandle>,
    ui: Box<dyn SelectionUi>,
    settings: Settings,
    selection: Selection,
    poller: VehiclePoller,
}

impl Controller {
    pub fn new(
        source: Arc<dyn DataSource>,
        map: Arc<dyn MapHandle>,
        ui: Box<dyn SelectionUi>,
        settings: Settings,
    ) -> Self {
        let poller = VehiclePoller::new(source.clone(), map.clone(), settings.poll_interval);
        Self {
            source,
            map,
            ui,
            settings,
            selection: Selection::Idle,
            poller,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    /// Sets up the map, then fills in the route picker. Without a route list the picker is just
    /// left empty.
    pub async fn initialize(&mut self) -> Result<()> {
        layers::setup(&*self.map).context("setting up map layers")?;
        self.ui.reset_directions();
        match self.source.list_routes().await {
            Ok(routes) => {
                info!("{} routes available", routes.len());
                self.ui.set_route_options(&routes);
            }
            Err(err) => {
                error!("Couldn't load the route list: {err:#}");
            }
        }
        Ok(())
    }

    /// Handle events until the stream ends. Clicks and hovers are answered right away, even while
    /// a selection is still loading, and a newer selection drops whatever load is in flight.
    /// Errors are logged and leave things as they were when the error happened.
    pub async fn run<E: Stream<Item = UiEvent> + Unpin>(&mut self, mut events: E) {
        let map = self.map.clone();
        let mut next = events.next().await;
        while let Some(event) = next.take() {
            if let UiEvent::Map(event) = event {
                interactions::handle(&*map, event);
                next = events.next().await;
                continue;
            }

            let work = self.handle(event);
            tokio::pin!(work);
            loop {
                tokio::select! {
                    biased;
                    result = &mut work => {
                        if let Err(err) = result {
                            warn!("{err:#}");
                        }
                        next = events.next().await;
                        break;
                    }
                    event = events.next() => match event {
                        Some(UiEvent::Map(event)) => interactions::handle(&*map, event),
                        // The placeholder never replaces a load
                        Some(UiEvent::DirectionChanged(None)) => {}
                        superseded => {
                            debug!("Dropping a selection that was still loading");
                            next = superseded;
                            break;
                        }
                    },
                }
            }
        }
        self.poller.stop();
    }

    pub async fn handle(&mut self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::RouteChanged(route) => self.on_route_changed(route).await,
            UiEvent::DirectionChanged(direction) => self.on_direction_changed(direction).await,
            UiEvent::Map(event) => {
                interactions::handle(&*self.map, event);
                Ok(())
            }
        }
    }

    pub async fn on_route_changed(&mut self, route: Option<RouteID>) -> Result<()> {
        self.ui.reset_directions();
        let route = match route {
            Some(route) => route,
            None => {
                self.selection = Selection::Idle;
                return self.clear_map();
            }
        };

        // The previous route stays drawn (and polling) until this one has something to show
        self.selection = Selection::RouteSelected(route.clone());
        let directions = self
            .source
            .list_directions(&route)
            .await
            .with_context(|| format!("loading directions for {route}"))?;
        self.ui.set_direction_options(&directions);

        let first = match directions.first() {
            Some(dir) => dir.direction_id.clone(),
            None => {
                // Picker stays disabled; take the old route down rather than leave it polling
                warn!("Route {route} has no directions");
                return self.clear_map();
            }
        };
        self.ui.set_directions_enabled(true);
        self.ui.select_direction(&first);
        self.update_map_data(route, first).await
    }

    pub async fn on_direction_changed(&mut self, direction: Option<DirectionID>) -> Result<()> {
        let direction = match direction {
            Some(direction) => direction,
            None => return Ok(()),
        };
        let route = match self.selection.route() {
            Some(route) => route.clone(),
            None => {
                debug!("Ignoring direction {direction} with no route picked");
                return Ok(());
            }
        };
        self.update_map_data(route, direction).await
    }

    /// Draws one direction of a route, frames it, and (re)starts vehicle polling.
    async fn update_map_data(&mut self, route: RouteID, direction: DirectionID) -> Result<()> {
        let data = self
            .source
            .load_map_data(&route, &direction)
            .await
            .with_context(|| format!("loading map data for {route} direction {direction}"))?;
        let stop_bounds = bounds::stop_bounds(&data.stops);
        info!(
            "Route {route} direction {direction}: {} shapes, {} stops",
            data.routes.features.len(),
            data.stops.features.len()
        );
        self.map.set_data(ROUTES_SOURCE, data.routes)?;
        self.map.set_data(STOPS_SOURCE, data.stops)?;

        if let Some(bounds) = stop_bounds {
            self.map.fit_bounds(&bounds, self.settings.fit);
        }

        self.selection = Selection::Active {
            route: route.clone(),
            direction,
        };
        self.poller.restart(route);
        Ok(())
    }

    /// Stops polling and empties routes, stops, and vehicles.
    pub fn clear_map(&mut self) -> Result<()> {
        self.poller.stop();
        for source in [ROUTES_SOURCE, STOPS_SOURCE, VEHICLES_SOURCE] {
            self.map.set_data(source, feed::empty_collection())?;
        }
        Ok(())
    }
}
