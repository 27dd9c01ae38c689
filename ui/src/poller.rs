use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use feed::{DataSource, RouteID};

use crate::map::{MapHandle, VEHICLES_SOURCE};

/// Owns the one repeating vehicle refresh. Starting a new one always stops the old one first, so
/// there's never more than one timer.
pub struct VehiclePoller {
    source: Arc<dyn DataSource>,
    map: Arc<dyn MapHandle>,
    interval: Duration,
    task: Option<(RouteID, JoinHandle<()>)>,
}

impl VehiclePoller {
    pub fn new(source: Arc<dyn DataSource>, map: Arc<dyn MapHandle>, interval: Duration) -> Self {
        Self {
            source,
            map,
            interval,
            task: None,
        }
    }

    /// Stops any existing timer, then starts one that refreshes right away and every interval
    /// after that. Returns without waiting for the first refresh.
    pub fn restart(&mut self, route: RouteID) {
        self.stop();

        let source = self.source.clone();
        let map = self.map.clone();
        let period = self.interval;
        let task_route = route.clone();
        let handle = tokio::spawn(async move {
            // The first tick completes immediately
            let mut ticker = tokio::time::interval(period);
            // Never stack up fetches behind a slow one
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                refresh(&*source, &*map, &task_route).await;
            }
        });
        debug!("Polling vehicles on {route} every {:?}", self.interval);
        self.task = Some((route, handle));
    }

    /// Also drops a refresh that's still in flight, so its response never lands.
    pub fn stop(&mut self) {
        if let Some((route, handle)) = self.task.take() {
            handle.abort();
            debug!("Stopped polling vehicles on {route}");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .as_ref()
            .map(|(_, handle)| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for VehiclePoller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A failed fetch leaves the last snapshot on the map; the timer keeps going.
async fn refresh(source: &dyn DataSource, map: &dyn MapHandle, route: &RouteID) {
    match source.load_vehicles(route).await {
        Ok(vehicles) => {
            let count = vehicles.features.len();
            if let Err(err) = map.set_data(VEHICLES_SOURCE, vehicles) {
                warn!("Couldn't draw vehicles on {route}: {err:#}");
            } else {
                debug!("{count} vehicles on {route}");
            }
        }
        Err(err) => {
            warn!("Couldn't refresh vehicles on {route}: {err:#}");
        }
    }
}
