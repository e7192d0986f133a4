//! Marker construction: geometry + style + popup text for each earthquake.

use chrono::{TimeZone, Utc};
use serde::Serialize;

use crate::depth::color_for_depth;
use crate::feed::geojson::Earthquake;

/// Fixed circle-marker style shared by every marker.
pub const STROKE_COLOR: &str = "#000000";
pub const STROKE_WEIGHT: f64 = 1.0;
pub const STROKE_OPACITY: f64 = 1.0;
pub const FILL_OPACITY: f64 = 0.8;

/// One circle marker handed to the map surface.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
    pub fill_color: &'static str,
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
    pub popup: Popup,
}

/// Popup content as fields; the page template owns presentation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Popup {
    pub place: String,
    pub time_utc: String,
    pub magnitude: f64,
    pub depth_km: f64,
}

/// Build the marker for one earthquake: radius scales with magnitude, fill
/// color comes from the depth classifier.
pub fn marker_for(quake: &Earthquake, radius_scale: f64) -> Marker {
    Marker {
        lat: quake.lat,
        lon: quake.lon,
        radius: quake.magnitude * radius_scale,
        fill_color: color_for_depth(quake.depth_km),
        color: STROKE_COLOR,
        weight: STROKE_WEIGHT,
        opacity: STROKE_OPACITY,
        fill_opacity: FILL_OPACITY,
        popup: Popup {
            place: quake.place.clone(),
            time_utc: format_event_time(quake.time_ms),
            magnitude: quake.magnitude,
            depth_km: quake.depth_km,
        },
    }
}

/// Single order-preserving pass over the validated features.
pub fn render_all(quakes: &[Earthquake], radius_scale: f64) -> Vec<Marker> {
    quakes.iter().map(|q| marker_for(q, radius_scale)).collect()
}

/// Epoch millis to a human-readable UTC timestamp.
pub fn format_event_time(time_ms: i64) -> String {
    match Utc.timestamp_millis_opt(time_ms).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("epoch ms {}", time_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quake(magnitude: f64, depth_km: f64) -> Earthquake {
        Earthquake {
            id: "t1".to_string(),
            place: "Test Ridge".to_string(),
            time_ms: 1_700_000_000_000,
            magnitude,
            depth_km,
            lon: -120.0,
            lat: 36.0,
        }
    }

    #[test]
    fn test_radius_scales_with_magnitude() {
        let m = marker_for(&quake(3.0, 5.0), 5.0);
        assert_eq!(m.radius, 15.0);
    }

    #[test]
    fn test_fill_color_comes_from_depth() {
        assert_eq!(marker_for(&quake(1.0, 5.0), 5.0).fill_color, "#66ff00");
        assert_eq!(marker_for(&quake(1.0, 95.0), 5.0).fill_color, "#ff0000");
    }

    #[test]
    fn test_fixed_style() {
        let m = marker_for(&quake(2.0, 40.0), 5.0);
        assert_eq!(m.color, "#000000");
        assert_eq!(m.weight, 1.0);
        assert_eq!(m.opacity, 1.0);
        assert_eq!(m.fill_opacity, 0.8);
    }

    #[test]
    fn test_popup_fields() {
        let m = marker_for(&quake(2.5, 12.0), 5.0);
        assert_eq!(m.popup.place, "Test Ridge");
        assert_eq!(m.popup.magnitude, 2.5);
        assert_eq!(m.popup.depth_km, 12.0);
        assert_eq!(m.popup.time_utc, "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn test_render_all_preserves_order() {
        let quakes = vec![quake(1.0, 5.0), quake(2.0, 35.0), quake(3.0, 95.0)];
        let markers = render_all(&quakes, 5.0);
        let radii: Vec<f64> = markers.iter().map(|m| m.radius).collect();
        assert_eq!(radii, vec![5.0, 10.0, 15.0]);
    }
}
