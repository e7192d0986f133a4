use anyhow::{Context, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::config::Config;

pub mod geojson;
pub mod usgs;

use geojson::RawFeed;

/// Where the feature collection comes from.
#[derive(Clone, Copy, Debug)]
pub enum FeedKind {
    Usgs,
    File,
}

impl FeedKind {
    pub fn from_env() -> Self {
        match std::env::var("FEED_SOURCE").unwrap_or_else(|_| "usgs".to_string()).as_str() {
            "file" => FeedKind::File,
            _ => FeedKind::Usgs,
        }
    }

    pub fn build(self, cfg: &Config) -> Result<Box<dyn FeedSource + Send + Sync>> {
        match self {
            FeedKind::Usgs => Ok(Box::new(usgs::UsgsFeed::new(cfg)?)),
            FeedKind::File => Ok(Box::new(FileFeed {
                path: std::env::var("FEED_FILE").unwrap_or_else(|_| "feed.geojson".to_string()),
            })),
        }
    }
}

/// A decoded collection plus provenance of the raw body it came from.
#[derive(Debug)]
pub struct FeedSnapshot {
    pub raw: RawFeed,
    pub body_sha256: String,
    pub bytes: usize,
}

#[async_trait]
pub trait FeedSource {
    async fn fetch(&self) -> Result<FeedSnapshot>;
}

/// Local file source, for offline rendering and tests.
pub struct FileFeed {
    pub path: String,
}

#[async_trait]
impl FeedSource for FileFeed {
    async fn fetch(&self) -> Result<FeedSnapshot> {
        let body =
            std::fs::read(&self.path).with_context(|| format!("cannot read {}", self.path))?;
        snapshot_from_bytes(&body)
    }
}

/// Digest and decode a raw feed body. Shared by every source.
pub fn snapshot_from_bytes(body: &[u8]) -> Result<FeedSnapshot> {
    let mut hasher = Sha256::new();
    hasher.update(body);
    let body_sha256 = hex::encode(hasher.finalize());
    let raw: RawFeed = serde_json::from_slice(body).context("feed body is not a feature collection")?;
    Ok(FeedSnapshot { raw, body_sha256, bytes: body.len() })
}
