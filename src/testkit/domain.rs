//! Builders for domain primitives used across tests.
//!
//! Generic-schema payloads, normalized quotes and mappings so tests focus
//! on assertions rather than construction boilerplate.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::adapter::outbound::fixture::GenericNormalizer;
use crate::application::NormalizerRegistry;
use crate::config::ScanConfig;
use crate::domain::{
    MappingTable, MarketId, MarketLeg, MarketPairMapping, NormalizedQuote, OutcomeQuote, Polarity,
    Tier, VenueId,
};

/// Generic-schema payload with one entry per `(label, ask, size)`.
///
/// Bids are left out; the engine only prices asks.
pub fn generic_payload(outcomes: &[(&str, Decimal, Decimal)]) -> Value {
    let outcomes: Vec<Value> = outcomes
        .iter()
        .map(|(label, ask, size)| {
            json!({
                "label": label,
                "best_ask": ask.to_string(),
                "size": size.to_string(),
            })
        })
        .collect();
    json!({ "outcomes": outcomes })
}

/// Generic-schema Yes/No payload.
pub fn binary_payload(yes_ask: Decimal, yes_size: Decimal, no_ask: Decimal, no_size: Decimal) -> Value {
    generic_payload(&[("Yes", yes_ask, yes_size), ("No", no_ask, no_size)])
}

/// Outcome quote with only an ask side.
pub fn ask(label: &str, price: Decimal, size: Decimal) -> OutcomeQuote {
    OutcomeQuote::new(label, None, Some(price), size)
}

/// Normalized quote observed now.
pub fn quote(venue: VenueId, market: &str, outcomes: Vec<OutcomeQuote>) -> NormalizedQuote {
    NormalizedQuote::new(venue, MarketId::from(market), outcomes, Utc::now())
}

/// Kalshi market `a` mapped to Polymarket market `b` with same polarity.
pub fn pair(a: &str, b: &str, tier: Tier) -> MarketPairMapping {
    MarketPairMapping::new(
        MarketLeg::new(VenueId::kalshi(), a),
        MarketLeg::new(VenueId::polymarket(), b),
        Polarity::Same,
        tier,
    )
}

/// Mapping table from SAFE and LAB entries.
pub fn table(safe: Vec<MarketPairMapping>, lab: Vec<MarketPairMapping>) -> MappingTable {
    MappingTable::new(safe, lab)
}

/// Registry reading the generic schema for both venues.
pub fn generic_registry() -> NormalizerRegistry {
    NormalizerRegistry::new()
        .with(VenueId::kalshi(), Arc::new(GenericNormalizer))
        .with(VenueId::polymarket(), Arc::new(GenericNormalizer))
}

/// Scan settings with a custom cycle deadline.
pub fn scan_config(max_concurrency: usize, cycle_timeout_ms: u64) -> ScanConfig {
    ScanConfig {
        max_concurrency,
        cycle_timeout_ms,
        ..ScanConfig::default()
    }
}
