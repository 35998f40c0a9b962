//! Fixed offline market data.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use crate::domain::{
    MappingTable, MarketId, MarketLeg, MarketPairMapping, Polarity, RawQuote, Tier, VenueId,
};
use crate::error::{Error, Result};
use crate::port::QuoteFetcher;

/// Serves generic-schema payloads for a handful of demo markets on both
/// venues.
pub struct StubFetcher {
    books: HashMap<(VenueId, MarketId), Value>,
}

impl Default for StubFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl StubFetcher {
    #[must_use]
    pub fn new() -> Self {
        let kalshi = VenueId::kalshi();
        let polymarket = VenueId::polymarket();
        let mut books = HashMap::new();

        for (venue, market, outcomes) in [
            (&kalshi, "btc-2025", binary(("0.50", "0.52", 120), ("0.47", "0.49", 80))),
            (&kalshi, "nfl-2025", binary(("0.33", "0.35", 200), ("0.66", "0.68", 140))),
            (&kalshi, "fed-2025", binary(("0.28", "0.30", 50), ("0.70", "0.72", 40))),
            (&polymarket, "btc-2025", binary(("0.48", "0.50", 150), ("0.41", "0.43", 90))),
            (&polymarket, "nfl-2025", binary(("0.34", "0.36", 60), ("0.64", "0.66", 110))),
            (
                &polymarket,
                "fed-2025",
                json!([
                    {"label": "Cut", "best_bid": "0.29", "best_ask": "0.31", "size": "75"},
                    {"label": "Hold", "best_bid": "0.58", "best_ask": "0.60", "size": "300"},
                    {"label": "Hike", "best_bid": "0.08", "best_ask": "0.10", "size": "20"}
                ]),
            ),
        ] {
            books.insert(
                (venue.clone(), stub_market(venue, market)),
                json!({ "outcomes": outcomes }),
            );
        }

        Self { books }
    }

    /// Mapping table matching the stub markets: one SAFE pair, two LAB.
    #[must_use]
    pub fn mappings() -> MappingTable {
        let pair = |market: &str, tier: Tier| {
            MarketPairMapping::new(
                MarketLeg::new(VenueId::kalshi(), stub_market(&VenueId::kalshi(), market)),
                MarketLeg::new(
                    VenueId::polymarket(),
                    stub_market(&VenueId::polymarket(), market),
                ),
                Polarity::Same,
                tier,
            )
        };
        MappingTable::new(
            vec![pair("btc-2025", Tier::Safe)],
            vec![pair("nfl-2025", Tier::Lab), pair("fed-2025", Tier::Lab)],
        )
    }
}

#[async_trait]
impl QuoteFetcher for StubFetcher {
    async fn fetch_quote(&self, venue: &VenueId, market_id: &MarketId) -> Result<RawQuote> {
        let payload = self
            .books
            .get(&(venue.clone(), market_id.clone()))
            .cloned()
            .ok_or_else(|| Error::Venue {
                venue: venue.clone(),
                message: format!("no stub data for market '{market_id}'"),
            })?;

        Ok(RawQuote::new(
            venue.clone(),
            market_id.clone(),
            payload,
            Utc::now(),
        ))
    }

    fn name(&self) -> &'static str {
        "Stub"
    }
}

fn stub_market(venue: &VenueId, market: &str) -> MarketId {
    MarketId::new(format!("{venue}-{market}"))
}

fn binary(yes: (&str, &str, u32), no: (&str, &str, u32)) -> Value {
    json!([
        {"label": "Yes", "best_bid": yes.0, "best_ask": yes.1, "size": yes.2},
        {"label": "No", "best_bid": no.0, "best_ask": no.1, "size": no.2}
    ])
}
