use geojson::{Feature, FeatureCollection, Value};
use geom::{GPSBounds, LonLat};

/// The box around every stop with a usable point. None when there's nothing to frame.
pub fn stop_bounds(stops: &FeatureCollection) -> Option<GPSBounds> {
    let mut bounds = GPSBounds::new();
    let mut any = false;
    for feature in &stops.features {
        if let Some((lon, lat)) = point(feature) {
            bounds.update(LonLat::new(lon, lat));
            any = true;
        }
    }
    if any {
        Some(bounds)
    } else {
        None
    }
}

/// Longitude and latitude of a point feature, skipping NaN and infinite coordinates
pub fn point(feature: &Feature) -> Option<(f64, f64)> {
    match feature.geometry.as_ref()?.value {
        Value::Point(ref pos) if pos.len() >= 2 => {
            let (lon, lat) = (pos[0], pos[1]);
            if lon.is_finite() && lat.is_finite() {
                Some((lon, lat))
            } else {
                None
            }
        }
        _ => None,
    }
}
