#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod bounds;
mod console;
mod controller;
mod interactions;
mod layers;
mod map;
mod poller;
mod selection;
mod settings;
#[cfg(test)]
mod testing;

pub use bounds::stop_bounds;
pub use console::{ConsoleMap, ConsoleSelection};
pub use controller::{Controller, Selection};
pub use interactions::MapEvent;
pub use layers::{
    all_layers, ARROW_ICON, BUS_ICON, ROUTES_LAYER, STOPS_LAYER, VEHICLES_DIRECTION_LAYER,
    VEHICLES_LAYER, VEHICLES_OUTLINE_LAYER,
};
pub use map::{
    Cursor, FitOptions, LayerSpec, LayerStyle, MapHandle, Popup, Stroke, ROUTES_SOURCE,
    STOPS_SOURCE, VEHICLES_SOURCE,
};
pub use poller::VehiclePoller;
pub use selection::{SelectionUi, UiEvent};
pub use settings::{DataLocation, InitialView, Settings};
