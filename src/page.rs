//! Map page assembly.
//!
//! The crate supplies one JSON data document (markers, legend, view, tile
//! layers, optional error state); a fixed HTML shell hands it to Leaflet,
//! which owns projection, tiling and interaction. Popup and legend content
//! cross the boundary as fields, never as markup.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::Config;
use crate::legend::{self, LegendEntry};
use crate::render::Marker;

/// A selectable background tiling.
#[derive(Debug, Clone, Serialize)]
pub struct TileLayer {
    pub name: &'static str,
    pub url_template: &'static str,
    pub attribution: &'static str,
}

/// Street + topographic base layers; the first one is shown on load.
pub fn base_layers() -> Vec<TileLayer> {
    vec![
        TileLayer {
            name: "Street Map",
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
        },
        TileLayer {
            name: "Topographic Map",
            url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
            attribution: "Map data: &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, <a href=\"http://viewfinderpanoramas.org\">SRTM</a> | Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> (<a href=\"https://creativecommons.org/licenses/by-sa/3.0/\">CC-BY-SA</a>)",
        },
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
}

/// Everything the rendering surface needs, in one document.
#[derive(Debug, Serialize)]
pub struct PageData {
    pub title: String,
    pub view: MapView,
    pub base_layers: Vec<TileLayer>,
    pub overlay_name: &'static str,
    pub markers: Vec<Marker>,
    pub legend: Vec<LegendEntry>,
    /// Set when the fetch failed; the page shows a banner instead of a blank map.
    pub error: Option<String>,
    pub generated_at: String,
}

impl PageData {
    pub fn build(cfg: &Config, markers: Vec<Marker>, error: Option<String>) -> Self {
        Self {
            title: cfg.page_title.clone(),
            view: MapView { lat: cfg.center_lat, lon: cfg.center_lon, zoom: cfg.zoom },
            base_layers: base_layers(),
            overlay_name: "Earthquakes",
            markers,
            legend: legend::entries(),
            error,
            generated_at: crate::logging::ts_now(),
        }
    }

    /// Splice the data document into the HTML shell.
    pub fn render_html(&self) -> Result<String> {
        let json = serde_json::to_string(self).context("page data serialization")?;
        // '<' only occurs inside JSON string values; escaping it keeps a
        // feed-supplied "</script>" from terminating the inline data block.
        let json = json.replace('<', "\\u003c");
        let html = PAGE_TEMPLATE
            .replacen("__TITLE__", &escape_html(&self.title), 1)
            .replacen("__DATA__", &json, 1);
        Ok(html)
    }

    /// Render and write the page, creating parent directories as needed.
    pub fn write(&self, path: &str) -> Result<()> {
        let html = self.render_html()?;
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("cannot create {}", parent.display()))?;
            }
        }
        std::fs::write(path, html).with_context(|| format!("cannot write {}", path))?;
        Ok(())
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const PAGE_TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>__TITLE__</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"/>
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>
    html, body, #map { height: 100%; margin: 0; }
    .legend {
      background: #fff;
      padding: 6px 8px;
      font: 14px/18px sans-serif;
      box-shadow: 0 0 15px rgba(0,0,0,0.2);
      border-radius: 5px;
    }
    .legend i { display: inline-block; width: 18px; height: 18px; margin-right: 8px; vertical-align: middle; }
    .feed-error {
      position: absolute;
      top: 10px;
      left: 50%;
      transform: translateX(-50%);
      z-index: 1000;
      background: #b00020;
      color: #fff;
      padding: 8px 16px;
      border-radius: 4px;
      font: 14px sans-serif;
    }
  </style>
</head>
<body>
  <div id="map"></div>
  <script id="quakemap-data" type="application/json">__DATA__</script>
  <script>
    const data = JSON.parse(document.getElementById("quakemap-data").textContent);

    const baseLayers = {};
    let firstBase = null;
    for (const t of data.base_layers) {
      const layer = L.tileLayer(t.url_template, { attribution: t.attribution });
      baseLayers[t.name] = layer;
      if (!firstBase) firstBase = layer;
    }

    const quakes = L.layerGroup();
    for (const m of data.markers) {
      const marker = L.circleMarker([m.lat, m.lon], {
        radius: m.radius,
        fillColor: m.fill_color,
        color: m.color,
        weight: m.weight,
        opacity: m.opacity,
        fillOpacity: m.fill_opacity
      });
      const div = document.createElement("div");
      const rows = [
        ["Location", m.popup.place],
        ["Time", m.popup.time_utc],
        ["Magnitude", String(m.popup.magnitude)],
        ["Depth", m.popup.depth_km + " km"]
      ];
      for (const [key, value] of rows) {
        const p = document.createElement("p");
        const b = document.createElement("b");
        b.textContent = key + ": ";
        p.appendChild(b);
        p.appendChild(document.createTextNode(value));
        div.appendChild(p);
      }
      marker.bindPopup(div);
      quakes.addLayer(marker);
    }

    const map = L.map("map", {
      center: [data.view.lat, data.view.lon],
      zoom: data.view.zoom,
      layers: [firstBase, quakes]
    });

    const overlays = {};
    overlays[data.overlay_name] = quakes;
    L.control.layers(baseLayers, overlays, { collapsed: false }).addTo(map);

    const legend = L.control({ position: "bottomright" });
    legend.onAdd = function () {
      const div = L.DomUtil.create("div", "legend");
      for (const entry of data.legend) {
        const row = document.createElement("div");
        const swatch = document.createElement("i");
        swatch.style.background = entry.color;
        row.appendChild(swatch);
        row.appendChild(document.createTextNode(entry.label));
        div.appendChild(row);
      }
      return div;
    };
    legend.addTo(map);

    if (data.error) {
      const banner = document.createElement("div");
      banner.className = "feed-error";
      banner.textContent = "Feed unavailable: " + data.error;
      document.body.appendChild(banner);
    }
  </script>
</body>
</html>
"##;
