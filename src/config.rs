use anyhow::{anyhow, Result};
use url::Url;

/// USGS summary feed: all earthquakes from the past 7 days.
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

#[derive(Clone, Debug)]
pub struct Config {
    pub feed_url: Url,
    pub out_path: String,
    pub page_title: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub fetch_timeout_secs: u64,
    /// Marker radius in pixels per unit of magnitude.
    pub radius_scale: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let raw_url = std::env::var("FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());
        let feed_url =
            Url::parse(&raw_url).map_err(|e| anyhow!("invalid FEED_URL '{}': {}", raw_url, e))?;
        Ok(Self {
            feed_url,
            out_path: std::env::var("OUT_PATH").unwrap_or_else(|_| "out/quakemap.html".to_string()),
            page_title: std::env::var("PAGE_TITLE").unwrap_or_else(|_| "Earthquake Map".to_string()),
            center_lat: std::env::var("MAP_CENTER_LAT").ok().and_then(|v| v.parse().ok()).unwrap_or(37.09),
            center_lon: std::env::var("MAP_CENTER_LON").ok().and_then(|v| v.parse().ok()).unwrap_or(-95.71),
            zoom: std::env::var("MAP_ZOOM").ok().and_then(|v| v.parse().ok()).unwrap_or(5),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(10),
            radius_scale: std::env::var("RADIUS_SCALE").ok().and_then(|v| v.parse().ok()).unwrap_or(5.0),
        })
    }
}
