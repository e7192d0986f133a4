use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::Config;

use super::{snapshot_from_bytes, FeedSnapshot, FeedSource};

/// Live USGS GeoJSON summary feed.
pub struct UsgsFeed {
    client: Client,
    url: Url,
}

impl UsgsFeed {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.fetch_timeout_secs))
            .build()?;
        Ok(Self { client, url: cfg.feed_url.clone() })
    }
}

#[async_trait]
impl FeedSource for UsgsFeed {
    async fn fetch(&self) -> Result<FeedSnapshot> {
        let resp = self.client.get(self.url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("feed returned HTTP {}", resp.status()));
        }
        let body = resp.bytes().await?;
        snapshot_from_bytes(&body)
    }
}
