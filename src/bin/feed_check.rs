//! Fetch (or read) a feed and report what ingestion would keep.

use anyhow::Result;

use quakemap::config::Config;
use quakemap::feed::geojson::ingest;
use quakemap::feed::usgs::UsgsFeed;
use quakemap::feed::{FeedSource, FileFeed};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env()?;

    let source: Box<dyn FeedSource + Send + Sync> = match std::env::args().nth(1) {
        Some(path) => {
            println!("Reading {}", path);
            Box::new(FileFeed { path })
        }
        None => {
            println!("Fetching {}", cfg.feed_url);
            Box::new(UsgsFeed::new(&cfg)?)
        }
    };

    let snapshot = source.fetch().await?;
    println!("Body: {} bytes, sha256 {}", snapshot.bytes, snapshot.body_sha256);

    let outcome = ingest(&snapshot.raw);
    let report = &outcome.report;
    println!();
    println!("Features:  {}", report.total);
    println!("Accepted:  {}", report.accepted);
    println!("Rejected:  {}", report.rejected);
    for (reason, count) in &report.reasons {
        println!("  {:20} {}", reason, count);
    }

    if report.accepted == 0 {
        anyhow::bail!("no usable features in feed");
    }
    Ok(())
}
