use anyhow::Result;

use crate::map::{
    LayerSpec, LayerStyle, MapHandle, Stroke, ROUTES_SOURCE, STOPS_SOURCE, VEHICLES_SOURCE,
};

pub const ROUTES_LAYER: &str = "routes-layer";
pub const STOPS_LAYER: &str = "stops-layer";
pub const VEHICLES_OUTLINE_LAYER: &str = "vehicles-outline";
pub const VEHICLES_LAYER: &str = "vehicles-layer";
pub const VEHICLES_DIRECTION_LAYER: &str = "vehicles-layer-dir";

pub const BUS_ICON: &str = "bus-icon";
pub const ARROW_ICON: &str = "arrow-icon";

const IMAGES: [(&str, &str); 2] = [
    (BUS_ICON, "./assets/bus-icon-2.png"),
    (ARROW_ICON, "./assets/bus-arrow.png"),
];

/// Bottom to top
pub fn all_layers() -> Vec<LayerSpec> {
    vec![
        LayerSpec {
            id: ROUTES_LAYER,
            source: ROUTES_SOURCE,
            style: LayerStyle::Line {
                color_property: "route_color",
                default_color: "#d63031",
                width: 4.0,
                opacity: 0.9,
                round_caps: true,
            },
        },
        LayerSpec {
            id: STOPS_LAYER,
            source: STOPS_SOURCE,
            style: LayerStyle::Circle {
                radius: 3.0,
                color: "#fff",
                stroke: Some(Stroke {
                    color: "#2d3436",
                    width: 1.5,
                }),
            },
        },
        LayerSpec {
            id: VEHICLES_OUTLINE_LAYER,
            source: VEHICLES_SOURCE,
            style: LayerStyle::Circle {
                radius: 22.0,
                color: "#000",
                stroke: None,
            },
        },
        LayerSpec {
            id: VEHICLES_LAYER,
            source: VEHICLES_SOURCE,
            style: LayerStyle::Symbol {
                icon: BUS_ICON,
                size: 0.04,
                allow_overlap: true,
                rotate_property: None,
                offset: [0.0, 0.0],
                align_to_map: true,
            },
        },
        LayerSpec {
            id: VEHICLES_DIRECTION_LAYER,
            source: VEHICLES_SOURCE,
            style: LayerStyle::Symbol {
                icon: ARROW_ICON,
                size: 0.4,
                allow_overlap: false,
                rotate_property: Some("arrow_bearing"),
                offset: [-62.0, 0.0],
                align_to_map: true,
            },
        },
    ]
}

/// Registers icons, the three empty sources, and every layer. A missing icon only loses that
/// icon; anything else is fatal.
pub fn setup(map: &dyn MapHandle) -> Result<()> {
    for (name, path) in IMAGES {
        if let Err(err) = map.add_image(name, path) {
            error!("Couldn't load icon {name} from {path}: {err:#}");
        }
    }
    for source in [ROUTES_SOURCE, STOPS_SOURCE, VEHICLES_SOURCE] {
        map.add_source(source)?;
    }
    for layer in all_layers() {
        map.add_layer(&layer)?;
    }
    Ok(())
}
