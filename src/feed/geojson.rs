//! Raw feed decode and ingestion validation.
//!
//! The feed is decoded in two stages: the collection shell parses strictly,
//! while each feature is decoded and validated on its own so one malformed
//! record never takes down the whole ingest. Rendering only ever sees
//! features that passed validation.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One validated earthquake, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Earthquake {
    pub id: String,
    pub place: String,
    pub time_ms: i64,
    pub magnitude: f64,
    pub depth_km: f64,
    pub lon: f64,
    pub lat: f64,
}

/// The collection shell. Features stay as raw JSON until `ingest` looks at
/// them one by one.
#[derive(Debug, Deserialize)]
pub struct RawFeed {
    pub features: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<String>,
    properties: Option<RawProperties>,
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawProperties {
    place: Option<String>,
    time: Option<i64>,
    mag: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    /// GeoJSON point order: [lon, lat, depth_km]
    coordinates: Vec<Value>,
}

/// Why a feature was rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    Undecodable,
    MissingMagnitude,
    NegativeMagnitude,
    MissingTime,
    MissingGeometry,
    ShortCoordinates,
    NonFiniteDepth,
    BadPosition,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Undecodable => "undecodable",
            RejectReason::MissingMagnitude => "missing_magnitude",
            RejectReason::NegativeMagnitude => "negative_magnitude",
            RejectReason::MissingTime => "missing_time",
            RejectReason::MissingGeometry => "missing_geometry",
            RejectReason::ShortCoordinates => "short_coordinates",
            RejectReason::NonFiniteDepth => "non_finite_depth",
            RejectReason::BadPosition => "bad_position",
        }
    }
}

/// Per-ingest accounting of accepted and rejected features.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct FeedReport {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub reasons: BTreeMap<String, usize>,
}

impl FeedReport {
    fn count_reject(&mut self, reason: RejectReason) {
        self.rejected += 1;
        *self.reasons.entry(reason.as_str().to_string()).or_insert(0) += 1;
    }
}

#[derive(Debug)]
pub struct IngestOutcome {
    pub quakes: Vec<Earthquake>,
    pub report: FeedReport,
}

/// Validate every feature in the collection. Accepted features keep their
/// input order; rejects are counted per reason and dropped.
pub fn ingest(raw: &RawFeed) -> IngestOutcome {
    let mut quakes = Vec::with_capacity(raw.features.len());
    let mut report = FeedReport { total: raw.features.len(), ..Default::default() };

    for (idx, value) in raw.features.iter().enumerate() {
        match validate_feature(idx, value) {
            Ok(quake) => {
                report.accepted += 1;
                quakes.push(quake);
            }
            Err(reason) => report.count_reject(reason),
        }
    }

    IngestOutcome { quakes, report }
}

fn validate_feature(idx: usize, value: &Value) -> Result<Earthquake, RejectReason> {
    let feature: RawFeature =
        serde_json::from_value(value.clone()).map_err(|_| RejectReason::Undecodable)?;

    let props = feature.properties.ok_or(RejectReason::Undecodable)?;
    let geometry = feature.geometry.ok_or(RejectReason::MissingGeometry)?;

    let magnitude = props.mag.ok_or(RejectReason::MissingMagnitude)?;
    if !magnitude.is_finite() {
        return Err(RejectReason::MissingMagnitude);
    }
    if magnitude < 0.0 {
        return Err(RejectReason::NegativeMagnitude);
    }

    let time_ms = props.time.ok_or(RejectReason::MissingTime)?;

    if geometry.coordinates.len() < 3 {
        return Err(RejectReason::ShortCoordinates);
    }
    let lon = num_at(&geometry.coordinates, 0).ok_or(RejectReason::BadPosition)?;
    let lat = num_at(&geometry.coordinates, 1).ok_or(RejectReason::BadPosition)?;
    let depth_km = num_at(&geometry.coordinates, 2).ok_or(RejectReason::NonFiniteDepth)?;

    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(RejectReason::BadPosition);
    }

    Ok(Earthquake {
        id: feature.id.unwrap_or_else(|| format!("feature-{}", idx)),
        place: props.place.unwrap_or_else(|| "Unknown location".to_string()),
        time_ms,
        magnitude,
        depth_km,
        lon,
        lat,
    })
}

fn num_at(coords: &[Value], idx: usize) -> Option<f64> {
    coords.get(idx).and_then(Value::as_f64).filter(|v| v.is_finite())
}
