//! Per-pair failures of the detection engine.
//!
//! None of these abort a scan cycle. Each maps to a [`SkipReason`] so the
//! cycle report can count skipped pairs by cause.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::candidate::LegSide;
use super::id::{MarketId, VenueId};

/// A venue payload could not be turned into a normalized quote.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    /// Outcome list was neither a list nor a string holding a list.
    #[error("malformed outcomes: {0}")]
    MalformedOutcomes(String),

    /// Payload is missing structure the venue schema requires.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// No normalizer is registered for the venue.
    #[error("no normalizer registered for venue '{0}'")]
    UnsupportedVenue(VenueId),
}

/// Why a pair produced no candidate this cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairError {
    #[error("leg {leg} ({venue}:{market}): {source}")]
    Normalization {
        leg: LegSide,
        venue: VenueId,
        market: MarketId,
        #[source]
        source: NormalizationError,
    },

    /// A required ask price is absent at the top of book.
    #[error("insufficient data: no ask for {side} on {venue}:{market}")]
    InsufficientData {
        venue: VenueId,
        market: MarketId,
        side: &'static str,
    },

    /// Capital basis is not positive; points at bad upstream data.
    #[error("degenerate hedge: capital basis {capital} is not positive")]
    DegenerateHedge { capital: Decimal },

    /// The fetch did not finish before the cycle deadline.
    #[error("fetch timed out before cycle deadline")]
    FetchTimeout,

    /// The venue client gave up after its own retries.
    #[error("fetch failed for {venue}:{market}: {message}")]
    Fetch {
        venue: VenueId,
        market: MarketId,
        message: String,
    },
}

impl PairError {
    #[must_use]
    pub const fn reason(&self) -> SkipReason {
        match self {
            Self::Normalization { .. } => SkipReason::Normalization,
            Self::InsufficientData { .. } => SkipReason::InsufficientData,
            Self::DegenerateHedge { .. } => SkipReason::DegenerateHedge,
            Self::FetchTimeout => SkipReason::FetchTimeout,
            Self::Fetch { .. } => SkipReason::FetchError,
        }
    }
}

/// Counting key for skipped pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Normalization,
    InsufficientData,
    DegenerateHedge,
    FetchTimeout,
    FetchError,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normalization => "normalization",
            Self::InsufficientData => "insufficient_data",
            Self::DegenerateHedge => "degenerate_hedge",
            Self::FetchTimeout => "fetch_timeout",
            Self::FetchError => "fetch_error",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
