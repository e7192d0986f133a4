use anyhow::{anyhow, Result};
use serde_json::json;

use quakemap::config::Config;
use quakemap::feed::geojson::ingest;
use quakemap::feed::FeedKind;
use quakemap::logging::{json_log, obj, v_num, v_str};
use quakemap::page::PageData;
use quakemap::render::render_all;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env()?;
    json_log(
        "startup",
        obj(&[
            ("feed_url", v_str(cfg.feed_url.as_str())),
            ("out_path", v_str(&cfg.out_path)),
            ("radius_scale", v_num(cfg.radius_scale)),
        ]),
    );

    let source = FeedKind::from_env().build(&cfg)?;

    // One fetch, one synchronous render pass. A fetch failure still produces
    // a page, carrying the error state instead of a blank map.
    let (markers, fetch_error) = match source.fetch().await {
        Ok(snapshot) => {
            json_log(
                "feed_fetch",
                obj(&[
                    ("status", v_str("ok")),
                    ("bytes", v_num(snapshot.bytes as f64)),
                    ("body_sha256", v_str(&snapshot.body_sha256)),
                ]),
            );

            let outcome = ingest(&snapshot.raw);
            json_log(
                "ingest",
                obj(&[
                    ("total", v_num(outcome.report.total as f64)),
                    ("accepted", v_num(outcome.report.accepted as f64)),
                    ("rejected", v_num(outcome.report.rejected as f64)),
                    ("reasons", json!(outcome.report.reasons)),
                ]),
            );

            let markers = render_all(&outcome.quakes, cfg.radius_scale);
            json_log("render", obj(&[("markers", v_num(markers.len() as f64))]));
            (markers, None)
        }
        Err(err) => {
            json_log(
                "feed_fetch",
                obj(&[("status", v_str("error")), ("error", v_str(&err.to_string()))]),
            );
            (Vec::new(), Some(err.to_string()))
        }
    };

    let data = PageData::build(&cfg, markers, fetch_error.clone());
    data.write(&cfg.out_path)?;
    json_log(
        "page_write",
        obj(&[
            ("path", v_str(&cfg.out_path)),
            ("markers", v_num(data.markers.len() as f64)),
            ("legend_entries", v_num(data.legend.len() as f64)),
        ]),
    );

    match fetch_error {
        Some(msg) => Err(anyhow!("feed fetch failed: {}", msg)),
        None => Ok(()),
    }
}
