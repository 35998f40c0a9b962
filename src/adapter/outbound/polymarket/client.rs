//! Polymarket REST client.
//!
//! A mapped Polymarket market is identified by its slug. One quote takes
//! a Gamma lookup for the outcome tokens, then one CLOB book per token.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures_util::future::try_join_all;
use tokio::sync::Semaphore;
use tracing::debug;

use super::dto::{BookResponse, GammaMarket, QuotePayload};
use super::normalizer::token_ids;
use crate::adapter::outbound::http::JsonHttp;
use crate::config::PolymarketConfig;
use crate::domain::{MarketId, RawQuote, VenueId};
use crate::error::{Error, Result};
use crate::port::QuoteFetcher;

/// HTTP client for the Polymarket Gamma and CLOB APIs.
pub struct PolymarketClient {
    http: JsonHttp,
    /// CLOB API base URL (order books).
    base_url: String,
    /// Gamma API base URL (market metadata).
    gamma_url: String,
}

impl PolymarketClient {
    #[must_use]
    pub fn from_config(config: &PolymarketConfig) -> Self {
        Self {
            http: JsonHttp::from_config(&config.http),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            gamma_url: config.gamma_api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Share a request limiter with other venue clients.
    #[must_use]
    pub fn with_limiter(mut self, limiter: Arc<Semaphore>) -> Self {
        self.http = self.http.with_limiter(limiter);
        self
    }

    /// Look up a market by slug on the Gamma API.
    pub async fn get_gamma_market(&self, slug: &str) -> Result<GammaMarket> {
        let url = format!("{}/markets", self.gamma_url);
        let markets: Vec<GammaMarket> = self.http.get(&url, &[("slug", slug)]).await?;
        debug!(slug, count = markets.len(), "Fetched markets from Gamma");
        pick_market(markets, slug).ok_or_else(|| Error::Venue {
            venue: VenueId::polymarket(),
            message: format!("no Gamma market for slug '{slug}'"),
        })
    }

    /// Fetch the CLOB order book for one outcome token.
    pub async fn get_book(&self, token_id: &str) -> Result<BookResponse> {
        let url = format!("{}/book", self.base_url);
        self.http.get(&url, &[("token_id", token_id)]).await
    }
}

#[async_trait]
impl QuoteFetcher for PolymarketClient {
    async fn fetch_quote(&self, venue: &VenueId, market_id: &MarketId) -> Result<RawQuote> {
        let market = self.get_gamma_market(market_id.as_str()).await?;
        let tokens = token_ids(&market.clob_token_ids)?;

        let books = try_join_all(tokens.iter().map(|id| async move {
            let mut book = self.get_book(id).await?;
            book.asset_id.get_or_insert_with(|| id.clone());
            Ok::<_, Error>(book)
        }))
        .await?;
        let payload = serde_json::to_value(QuotePayload { market, books })?;

        Ok(RawQuote::new(
            venue.clone(),
            market_id.clone(),
            payload,
            Utc::now(),
        ))
    }

    fn name(&self) -> &'static str {
        "Polymarket"
    }
}

/// Exact slug match first; Gamma sometimes returns near matches.
fn pick_market(markets: Vec<GammaMarket>, slug: &str) -> Option<GammaMarket> {
    let exact = markets
        .iter()
        .position(|m| m.slug.as_deref() == Some(slug));
    match exact {
        Some(index) => markets.into_iter().nth(index),
        None => markets.into_iter().next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn market(slug: &str) -> GammaMarket {
        serde_json::from_value(json!({"slug": slug, "active": true})).unwrap()
    }

    #[test]
    fn pick_market_prefers_exact_slug() {
        let picked = pick_market(vec![market("other"), market("target")], "target").unwrap();
        assert_eq!(picked.slug.as_deref(), Some("target"));
    }

    #[test]
    fn pick_market_falls_back_to_first() {
        let picked = pick_market(vec![market("a"), market("b")], "c").unwrap();
        assert_eq!(picked.slug.as_deref(), Some("a"));
        assert!(pick_market(vec![], "c").is_none());
    }

    #[test]
    fn client_from_config_trims_trailing_slash() {
        let config = PolymarketConfig {
            api_url: "https://clob.example.com/".into(),
            ..PolymarketConfig::default()
        };
        let client = PolymarketClient::from_config(&config);
        assert_eq!(client.base_url, "https://clob.example.com");
        assert_eq!(client.name(), "Polymarket");
    }
}
