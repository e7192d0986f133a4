//! End-to-end validation of the feed-to-page pipeline over a fixture feed:
//! ingest, classify, render, legend, page write.

use quakemap::config::Config;
use quakemap::depth::{color_for_depth, BUCKETS};
use quakemap::feed::geojson::ingest;
use quakemap::feed::snapshot_from_bytes;
use quakemap::legend;
use quakemap::page::PageData;
use quakemap::render::render_all;

/// A small feature collection in the shape of the USGS summary feed:
/// five valid earthquakes spanning the depth range plus two malformed ones.
const FIXTURE: &str = r#"{
  "type": "FeatureCollection",
  "metadata": { "title": "fixture" },
  "features": [
    { "type": "Feature", "id": "f1",
      "properties": { "place": "Shallow Basin", "time": 1700000000000, "mag": 3.0 },
      "geometry": { "type": "Point", "coordinates": [-120.1, 36.2, -5.0] } },
    { "type": "Feature", "id": "f2",
      "properties": { "place": "Boundary Ridge", "time": 1700000100000, "mag": 2.0 },
      "geometry": { "type": "Point", "coordinates": [-121.0, 37.0, 10.0] } },
    { "type": "Feature", "id": "f3",
      "properties": { "place": "Just Past Boundary", "time": 1700000200000, "mag": 1.5 },
      "geometry": { "type": "Point", "coordinates": [-122.0, 38.0, 10.01] } },
    { "type": "Feature", "id": "f4",
      "properties": { "place": "Mid Slab", "time": 1700000300000, "mag": 4.4 },
      "geometry": { "type": "Point", "coordinates": [142.3, 38.9, 60.0] } },
    { "type": "Feature", "id": "f5",
      "properties": { "place": "Deep Zone", "time": 1700000400000, "mag": 5.1 },
      "geometry": { "type": "Point", "coordinates": [179.9, -17.8, 95.0] } },
    { "type": "Feature", "id": "bad1",
      "properties": { "place": "No Magnitude", "time": 1700000500000, "mag": null },
      "geometry": { "type": "Point", "coordinates": [0.0, 0.0, 5.0] } },
    { "type": "Feature", "id": "bad2",
      "properties": { "place": "No Depth", "time": 1700000600000, "mag": 2.2 },
      "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } }
  ]
}"#;

fn fixture_markers() -> Vec<quakemap::render::Marker> {
    let snapshot = snapshot_from_bytes(FIXTURE.as_bytes()).unwrap();
    let outcome = ingest(&snapshot.raw);
    render_all(&outcome.quakes, 5.0)
}

// ---------------------------------------------------------------------------
// P01: Ingestion keeps the valid features, rejects the malformed, in order
// ---------------------------------------------------------------------------
#[test]
fn p01_ingest_accepts_and_rejects() {
    let snapshot = snapshot_from_bytes(FIXTURE.as_bytes()).unwrap();
    let outcome = ingest(&snapshot.raw);
    assert_eq!(outcome.report.total, 7);
    assert_eq!(outcome.report.accepted, 5);
    assert_eq!(outcome.report.rejected, 2);
    assert_eq!(outcome.report.reasons.get("missing_magnitude"), Some(&1));
    assert_eq!(outcome.report.reasons.get("short_coordinates"), Some(&1));
    let ids: Vec<&str> = outcome.quakes.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["f1", "f2", "f3", "f4", "f5"]);
}

// ---------------------------------------------------------------------------
// P02: Depth-to-color scenarios across the bucket range
// ---------------------------------------------------------------------------
#[test]
fn p02_depth_color_scenarios() {
    let markers = fixture_markers();
    let colors: Vec<&str> = markers.iter().map(|m| m.fill_color).collect();
    // -5, 10, 10.01, 60, 95
    assert_eq!(colors, vec!["#66ff00", "#66ff00", "#ccff00", "#ff9933", "#ff0000"]);
}

// ---------------------------------------------------------------------------
// P03: Radius scales with magnitude (mag 3.0 at scale 5 renders radius 15)
// ---------------------------------------------------------------------------
#[test]
fn p03_radius_from_magnitude() {
    let markers = fixture_markers();
    assert_eq!(markers[0].radius, 15.0);
    assert!((markers[4].radius - 25.5).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// P04: Legend and classifier stay in lockstep
// ---------------------------------------------------------------------------
#[test]
fn p04_legend_matches_classifier() {
    let rows = legend::entries();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows.last().unwrap().label, "90+");
    let legend_colors: Vec<&str> = rows.iter().map(|e| e.color).collect();
    let table_colors: Vec<&str> = BUCKETS.iter().map(|b| b.color).collect();
    assert_eq!(legend_colors, table_colors);
    // Every color the classifier can emit appears in the legend, in order.
    let probes = [0.0, 20.0, 40.0, 60.0, 80.0, 120.0];
    let classified: Vec<&str> = probes.iter().map(|d| color_for_depth(*d)).collect();
    assert_eq!(classified, legend_colors);
}

// ---------------------------------------------------------------------------
// P05: Page document carries markers and legend; file lands on disk
// ---------------------------------------------------------------------------
#[test]
fn p05_page_write_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.html");
    let cfg = Config::from_env().unwrap();

    let data = PageData::build(&cfg, fixture_markers(), None);
    data.write(path.to_str().unwrap()).unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("<!doctype html>"));
    assert!(html.contains("Shallow Basin"));
    assert!(html.contains("#ff0000"));

    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(value["markers"].as_array().unwrap().len(), 5);
    assert_eq!(value["legend"].as_array().unwrap().len(), 6);
    assert!(value["error"].is_null());
}

// ---------------------------------------------------------------------------
// P06: Fetch failure still produces a page, with a visible error state
// ---------------------------------------------------------------------------
#[test]
fn p06_error_page_instead_of_blank_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.html");
    let cfg = Config::from_env().unwrap();

    let data = PageData::build(&cfg, Vec::new(), Some("dns failure".to_string()));
    data.write(path.to_str().unwrap()).unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("dns failure"));
    // The legend and base layers are still present even with no data.
    assert!(html.contains("90+"));
    assert!(html.contains("opentopomap"));
}

// ---------------------------------------------------------------------------
// P07: File feed source drives the same pipeline
// ---------------------------------------------------------------------------
#[tokio::test]
async fn p07_file_feed_source() {
    use quakemap::feed::{FeedSource, FileFeed};

    let dir = tempfile::tempdir().unwrap();
    let feed_path = dir.path().join("fixture.geojson");
    std::fs::write(&feed_path, FIXTURE).unwrap();

    let source = FileFeed { path: feed_path.to_str().unwrap().to_string() };
    let snapshot = source.fetch().await.unwrap();
    assert_eq!(snapshot.bytes, FIXTURE.len());
    assert_eq!(snapshot.body_sha256.len(), 64);

    let outcome = ingest(&snapshot.raw);
    assert_eq!(outcome.quakes.len(), 5);
}
