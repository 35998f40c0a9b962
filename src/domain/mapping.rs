//! Cross-venue market equivalences.
//!
//! A [`MarketPairMapping`] says that one market on venue A and one market on
//! venue B settle on the same real-world event, and how their outcomes line
//! up ([`Polarity`]). Mappings are curated by hand in two confidence tiers
//! ([`Tier`]) and grouped in a [`MappingTable`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::{MarketId, VenueId};

/// Confidence tier of a curated mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Vetted equivalence.
    Safe,
    /// Speculative or unverified equivalence.
    Lab,
}

impl Tier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Lab => "lab",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which tiers a scan considers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// SAFE tier only.
    Safe,
    /// SAFE plus LAB.
    #[default]
    Lab,
}

impl ScanMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Lab => "lab",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safe" => Ok(Self::Safe),
            "lab" => Ok(Self::Lab),
            other => Err(format!("unknown mode '{other}', expected 'safe' or 'lab'")),
        }
    }
}

/// How the outcomes of the two markets correspond.
///
/// Always declared explicitly; never inferred from label text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// A's YES and B's YES describe the same event. Hedge: YES on A + NO on B.
    #[default]
    Same,
    /// A's YES is B's NO (opposite framing). Hedge: YES on A + YES on B.
    Inverse,
}

/// Binary outcome side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Yes,
    No,
}

impl Polarity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Same => "same",
            Self::Inverse => "inverse",
        }
    }

    /// The side bought on venue B to complement YES on venue A.
    #[must_use]
    pub const fn complement_side(self) -> Side {
        match self {
            Self::Same => Side::No,
            Self::Inverse => Side::Yes,
        }
    }
}

fn default_yes_label() -> String {
    "Yes".into()
}

/// One side of a mapping: a market on a venue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketLeg {
    pub venue: VenueId,
    pub market_id: MarketId,
    /// Label of the outcome treated as YES on this market.
    #[serde(default = "default_yes_label")]
    pub yes_label: String,
}

impl MarketLeg {
    pub fn new(venue: impl Into<VenueId>, market_id: impl Into<MarketId>) -> Self {
        Self {
            venue: venue.into(),
            market_id: market_id.into(),
            yes_label: default_yes_label(),
        }
    }

    /// Override the YES outcome label.
    #[must_use]
    pub fn with_yes_label(mut self, label: impl Into<String>) -> Self {
        self.yes_label = label.into();
        self
    }

    fn key(&self) -> (VenueId, MarketId) {
        (self.venue.clone(), self.market_id.clone())
    }
}

impl fmt::Display for MarketLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.venue, self.market_id)
    }
}

/// Identity of a mapped pair, used for ordering and de-duplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    pub venue_a: VenueId,
    pub market_a: MarketId,
    pub venue_b: VenueId,
    pub market_b: MarketId,
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} vs {}:{}",
            self.venue_a, self.market_a, self.venue_b, self.market_b
        )
    }
}

impl Serialize for PairKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Static correspondence between a market on venue A and one on venue B.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPairMapping {
    pub a: MarketLeg,
    pub b: MarketLeg,
    #[serde(default)]
    pub polarity: Polarity,
    /// Set by the table the mapping was loaded from.
    #[serde(skip, default = "default_tier")]
    pub tier: Tier,
}

const fn default_tier() -> Tier {
    Tier::Safe
}

impl MarketPairMapping {
    pub fn new(a: MarketLeg, b: MarketLeg, polarity: Polarity, tier: Tier) -> Self {
        Self {
            a,
            b,
            polarity,
            tier,
        }
    }

    #[must_use]
    pub fn key(&self) -> PairKey {
        PairKey {
            venue_a: self.a.venue.clone(),
            market_a: self.a.market_id.clone(),
            venue_b: self.b.venue.clone(),
            market_b: self.b.market_id.clone(),
        }
    }

    /// Both `(venue, market)` legs referenced by this mapping.
    #[must_use]
    pub fn markets(&self) -> [(VenueId, MarketId); 2] {
        [self.a.key(), self.b.key()]
    }
}

/// Two-tier table of curated mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MappingTable {
    #[serde(default)]
    safe: Vec<MarketPairMapping>,
    #[serde(default)]
    lab: Vec<MarketPairMapping>,
}

impl MappingTable {
    /// Build a table, tagging each mapping with its tier.
    pub fn new(safe: Vec<MarketPairMapping>, lab: Vec<MarketPairMapping>) -> Self {
        Self { safe, lab }.tagged()
    }

    /// Re-tag entries after deserialization.
    #[must_use]
    pub fn tagged(mut self) -> Self {
        for mapping in &mut self.safe {
            mapping.tier = Tier::Safe;
        }
        for mapping in &mut self.lab {
            mapping.tier = Tier::Lab;
        }
        self
    }

    #[must_use]
    pub fn safe(&self) -> &[MarketPairMapping] {
        &self.safe
    }

    #[must_use]
    pub fn lab(&self) -> &[MarketPairMapping] {
        &self.lab
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.safe.len() + self.lab.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.safe.is_empty() && self.lab.is_empty()
    }
}
