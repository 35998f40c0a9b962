//! Exchange-agnostic domain types.

mod candidate;
mod error;
mod id;
mod mapping;
mod money;
mod quote;

pub use candidate::{Candidate, HedgeResult, LegSide, MismatchReason};
pub use error::{NormalizationError, PairError, SkipReason};
pub use id::{MarketId, VenueId};
pub use mapping::{
    MappingTable, MarketLeg, MarketPairMapping, PairKey, Polarity, ScanMode, Side, Tier,
};
pub use money::{is_probability, Price, Volume, BPS_PER_UNIT};
pub use quote::{NormalizedQuote, OutcomeQuote, RawQuote};
