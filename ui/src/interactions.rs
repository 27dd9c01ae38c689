use geojson::Feature;
use serde_json::Value;

use crate::bounds;
use crate::layers::{STOPS_LAYER, VEHICLES_LAYER};
use crate::map::{Cursor, MapHandle, Popup};

/// What the map widget reports about the pointer, per layer
#[derive(Clone, Debug)]
pub enum MapEvent {
    Click { layer: String, feature: Feature },
    Enter { layer: String },
    Leave { layer: String },
}

pub fn is_interactive(layer: &str) -> bool {
    layer == STOPS_LAYER || layer == VEHICLES_LAYER
}

pub fn handle(map: &dyn MapHandle, event: MapEvent) {
    match event {
        MapEvent::Click { layer, feature } => {
            if let Some(popup) = popup_for(&layer, &feature) {
                map.show_popup(popup);
            }
        }
        MapEvent::Enter { layer } => {
            if is_interactive(&layer) {
                map.set_cursor(Cursor::Pointer);
            }
        }
        MapEvent::Leave { layer } => {
            if is_interactive(&layer) {
                map.set_cursor(Cursor::Default);
            }
        }
    }
}

pub fn popup_for(layer: &str, feature: &Feature) -> Option<Popup> {
    let (lon, lat) = bounds::point(feature)?;
    let (title, lines) = if layer == STOPS_LAYER {
        (
            describe(feature, "stop_name"),
            vec![format!("ID: {}", describe(feature, "stop_id"))],
        )
    } else if layer == VEHICLES_LAYER {
        (
            format!("Vehicle: {}", describe(feature, "vehicle_id")),
            Vec::new(),
        )
    } else {
        return None;
    };
    Some(Popup {
        lon,
        lat,
        title,
        lines,
    })
}

fn describe(feature: &Feature, key: &str) -> String {
    match feature.property(key) {
        Some(Value::String(x)) => x.clone(),
        None | Some(Value::Null) => "?".to_string(),
        Some(x) => x.to_string(),
    }
}
