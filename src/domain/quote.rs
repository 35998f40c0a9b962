//! Venue quotes before and after normalization.
//!
//! - [`RawQuote`] - venue payload exactly as fetched, stamped with fetch time
//! - [`OutcomeQuote`] - top of book for one outcome
//! - [`NormalizedQuote`] - one venue's view of one market, venue-agnostic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{MarketId, VenueId};
use super::money::{is_probability, Price, Volume};

/// A venue payload as returned by a fetcher.
///
/// The payload shape is venue specific; only the matching normalizer
/// understands it. `fetched_at` becomes the quote's `observed_at` so
/// normalization itself stays pure.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuote {
    pub venue: VenueId,
    pub market_id: MarketId,
    pub payload: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
}

impl RawQuote {
    /// Wrap a payload fetched at `fetched_at`.
    pub fn new(
        venue: VenueId,
        market_id: MarketId,
        payload: serde_json::Value,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            venue,
            market_id,
            payload,
            fetched_at,
        }
    }
}

/// Top of book for a single outcome.
///
/// Prices are optional: a missing side means no usable liquidity, never
/// an implicit 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeQuote {
    label: String,
    best_bid: Option<Price>,
    best_ask: Option<Price>,
    top_of_book_size: Volume,
}

impl OutcomeQuote {
    /// Create an outcome quote, discarding prices outside (0, 1) and
    /// clamping negative sizes to zero.
    pub fn new(
        label: impl Into<String>,
        best_bid: Option<Price>,
        best_ask: Option<Price>,
        top_of_book_size: Volume,
    ) -> Self {
        Self {
            label: label.into(),
            best_bid: best_bid.filter(|p| is_probability(*p)),
            best_ask: best_ask.filter(|p| is_probability(*p)),
            top_of_book_size: top_of_book_size.max(Volume::ZERO),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn best_bid(&self) -> Option<Price> {
        self.best_bid
    }

    #[must_use]
    pub const fn best_ask(&self) -> Option<Price> {
        self.best_ask
    }

    #[must_use]
    pub const fn top_of_book_size(&self) -> Volume {
        self.top_of_book_size
    }

    /// Case-insensitive label comparison.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.label.trim().eq_ignore_ascii_case(label.trim())
    }
}

/// One venue's state for one market at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuote {
    venue_id: VenueId,
    market_id: MarketId,
    outcomes: Vec<OutcomeQuote>,
    observed_at: DateTime<Utc>,
}

impl NormalizedQuote {
    pub fn new(
        venue_id: VenueId,
        market_id: MarketId,
        outcomes: Vec<OutcomeQuote>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            venue_id,
            market_id,
            outcomes,
            observed_at,
        }
    }

    #[must_use]
    pub const fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }

    #[must_use]
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    #[must_use]
    pub fn outcomes(&self) -> &[OutcomeQuote] {
        &self.outcomes
    }

    #[must_use]
    pub const fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// Number of outcomes quoted.
    #[must_use]
    pub fn outcome_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Clean binary shape: exactly two outcomes.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.outcomes.len() == 2
    }

    /// Index of the first outcome carrying `label` (case-insensitive).
    #[must_use]
    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.outcomes.iter().position(|o| o.has_label(label))
    }
}
