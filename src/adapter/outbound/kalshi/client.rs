//! Kalshi REST client.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::debug;
use url::Url;

use crate::adapter::outbound::http::JsonHttp;
use crate::config::KalshiConfig;
use crate::domain::{MarketId, RawQuote, VenueId};
use crate::error::{Error, Result};
use crate::port::QuoteFetcher;

/// Fetches order books from the Kalshi trade API.
pub struct KalshiClient {
    http: JsonHttp,
    api_url: String,
    depth: String,
}

impl KalshiClient {
    #[must_use]
    pub fn from_config(config: &KalshiConfig) -> Self {
        Self {
            http: JsonHttp::from_config(&config.http),
            api_url: config.api_url.clone(),
            depth: config.depth.to_string(),
        }
    }

    /// Share a request limiter with other venue clients.
    #[must_use]
    pub fn with_limiter(mut self, limiter: Arc<Semaphore>) -> Self {
        self.http = self.http.with_limiter(limiter);
        self
    }

    /// URL of the order book endpoint for a ticker.
    pub fn orderbook_url(&self, ticker: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)?;
        url.path_segments_mut()
            .map_err(|()| Error::Venue {
                venue: VenueId::kalshi(),
                message: format!("api_url '{}' cannot be a base", self.api_url),
            })?
            .pop_if_empty()
            .extend(["markets", ticker, "orderbook"]);
        Ok(url)
    }
}

#[async_trait]
impl QuoteFetcher for KalshiClient {
    async fn fetch_quote(&self, venue: &VenueId, market_id: &MarketId) -> Result<RawQuote> {
        let url = self.orderbook_url(market_id.as_str())?;
        debug!(%url, "Fetching Kalshi order book");

        let payload: Value = self
            .http
            .get(url.as_str(), &[("depth", self.depth.as_str())])
            .await?;

        Ok(RawQuote::new(
            venue.clone(),
            market_id.clone(),
            payload,
            Utc::now(),
        ))
    }

    fn name(&self) -> &'static str {
        "Kalshi"
    }
}
