//! Scan results.
//!
//! A [`Candidate`] is produced fresh for every evaluated pair in every cycle
//! and never updated afterwards. Its JSON form is the documented report
//! shape consumed by downstream tooling.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::mapping::{PairKey, Tier};
use super::money::{Price, Volume};

/// Which leg of a mapping a finding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LegSide {
    A,
    B,
}

impl fmt::Display for LegSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// Why a pair is not a clean binary complement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchReason {
    /// A leg does not have exactly two outcomes.
    NonBinary { leg: LegSide, count: usize },
    /// The declared YES label is not among the leg's outcomes.
    UnresolvedLabel { leg: LegSide, label: String },
    /// Both outcomes of a leg carry the same label.
    AmbiguousLabels { leg: LegSide },
}

impl MismatchReason {
    /// Stable machine-readable reason code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NonBinary { .. } => "non_binary",
            Self::UnresolvedLabel { .. } => "unresolved_label",
            Self::AmbiguousLabels { .. } => "ambiguous_labels",
        }
    }
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonBinary { leg, count } => {
                write!(f, "leg {leg} has {count} outcomes, expected 2")
            }
            Self::UnresolvedLabel { leg, label } => {
                write!(f, "leg {leg} has no outcome labelled '{label}'")
            }
            Self::AmbiguousLabels { leg } => write!(f, "leg {leg} repeats its outcome label"),
        }
    }
}

impl Serialize for MismatchReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Economics of buying one unit of each complementary leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HedgeResult {
    /// Ask of the YES leg on venue A.
    pub leg_a_price: Price,
    /// Ask of the complementary leg on venue B.
    pub leg_b_price: Price,
    /// Sum of both asks.
    pub hedge_cost: Price,
    /// Exactly one leg pays out.
    pub guaranteed_payout: Decimal,
    /// Size of the thinner leg.
    pub top_of_book_liquidity: Volume,
}

/// One scan result for one mapped pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    market_pair: PairKey,
    #[serde(rename = "best_yes_price_A")]
    best_yes_price_a: Price,
    #[serde(rename = "best_no_price_B")]
    best_no_price_b: Price,
    hedge_cost: Price,
    estimated_fees: Price,
    top_of_book_liquidity: Volume,
    market_mismatch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    mismatch_reason: Option<MismatchReason>,
    net_edge: Decimal,
    #[serde(skip)]
    tier: Tier,
}

impl Candidate {
    /// Assemble a candidate from already-computed engine outputs.
    pub fn new(
        market_pair: PairKey,
        tier: Tier,
        hedge: &HedgeResult,
        estimated_fees: Price,
        net_edge: Decimal,
        mismatch: Option<MismatchReason>,
    ) -> Self {
        Self {
            market_pair,
            best_yes_price_a: hedge.leg_a_price,
            best_no_price_b: hedge.leg_b_price,
            hedge_cost: hedge.hedge_cost,
            estimated_fees,
            top_of_book_liquidity: hedge.top_of_book_liquidity,
            market_mismatch: mismatch.is_some(),
            mismatch_reason: mismatch,
            net_edge,
            tier,
        }
    }

    #[must_use]
    pub const fn market_pair(&self) -> &PairKey {
        &self.market_pair
    }

    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    #[must_use]
    pub const fn best_yes_price_a(&self) -> Price {
        self.best_yes_price_a
    }

    #[must_use]
    pub const fn best_no_price_b(&self) -> Price {
        self.best_no_price_b
    }

    #[must_use]
    pub const fn hedge_cost(&self) -> Price {
        self.hedge_cost
    }

    #[must_use]
    pub const fn estimated_fees(&self) -> Price {
        self.estimated_fees
    }

    #[must_use]
    pub const fn top_of_book_liquidity(&self) -> Volume {
        self.top_of_book_liquidity
    }

    /// Whether hedge economics are unreliable for this pair.
    #[must_use]
    pub const fn market_mismatch(&self) -> bool {
        self.market_mismatch
    }

    #[must_use]
    pub fn mismatch_reason(&self) -> Option<&MismatchReason> {
        self.mismatch_reason.as_ref()
    }

    /// Fractional return on capital after the fee buffer.
    #[must_use]
    pub const fn net_edge(&self) -> Decimal {
        self.net_edge
    }
}
