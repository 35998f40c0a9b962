//! Scripted [`QuoteFetcher`] for engine and scanner tests.
//!
//! Each `(venue, market)` gets a fixed response: a payload, optionally
//! after a delay, or a failure. Unknown markets fail like a venue 404.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use crate::domain::{MarketId, RawQuote, VenueId};
use crate::error::{Error, Result};
use crate::port::QuoteFetcher;

#[derive(Debug, Clone)]
enum Response {
    Payload(Value),
    Fail(String),
}

#[derive(Debug, Clone)]
struct Script {
    response: Response,
    delay: Option<Duration>,
}

/// In-memory fetcher with canned per-market responses.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    scripts: HashMap<(VenueId, MarketId), Script>,
    calls: Arc<AtomicU32>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `payload` for the market.
    #[must_use]
    pub fn with_payload(mut self, venue: VenueId, market: &str, payload: Value) -> Self {
        self.insert(venue, market, Response::Payload(payload), None);
        self
    }

    /// Serve `payload` after sleeping for `delay`.
    #[must_use]
    pub fn with_delayed_payload(
        mut self,
        venue: VenueId,
        market: &str,
        payload: Value,
        delay: Duration,
    ) -> Self {
        self.insert(venue, market, Response::Payload(payload), Some(delay));
        self
    }

    /// Fail every fetch of the market with `message`.
    #[must_use]
    pub fn with_failure(mut self, venue: VenueId, market: &str, message: &str) -> Self {
        self.insert(venue, market, Response::Fail(message.to_string()), None);
        self
    }

    /// Shared counter of `fetch_quote` calls.
    pub fn calls(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.calls)
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn insert(&mut self, venue: VenueId, market: &str, response: Response, delay: Option<Duration>) {
        self.scripts
            .insert((venue, MarketId::from(market)), Script { response, delay });
    }
}

#[async_trait]
impl QuoteFetcher for ScriptedFetcher {
    async fn fetch_quote(&self, venue: &VenueId, market_id: &MarketId) -> Result<RawQuote> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let Some(script) = self.scripts.get(&(venue.clone(), market_id.clone())) else {
            return Err(Error::Venue {
                venue: venue.clone(),
                message: format!("market '{market_id}' not found"),
            });
        };

        if let Some(delay) = script.delay {
            tokio::time::sleep(delay).await;
        }

        match &script.response {
            Response::Payload(payload) => Ok(RawQuote::new(
                venue.clone(),
                market_id.clone(),
                payload.clone(),
                Utc::now(),
            )),
            Response::Fail(message) => Err(Error::Venue {
                venue: venue.clone(),
                message: message.clone(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
