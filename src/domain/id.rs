//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Venue identifier - newtype for type safety.
///
/// Venue ids are case-insensitive; the inner value is stored lowercased so
/// `"Kalshi"` and `"kalshi"` select the same normalizer and fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct VenueId(String);

impl VenueId {
    /// Create a new VenueId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_lowercase())
    }

    /// The Kalshi exchange.
    #[must_use]
    pub fn kalshi() -> Self {
        Self::new("kalshi")
    }

    /// The Polymarket exchange.
    #[must_use]
    pub fn polymarket() -> Self {
        Self::new("polymarket")
    }

    /// Get the venue ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VenueId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for VenueId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<VenueId> for String {
    fn from(id: VenueId) -> Self {
        id.0
    }
}

/// Venue-native market identifier (Kalshi ticker, Polymarket slug).
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(String);

impl MarketId {
    /// Create a new MarketId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the market ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MarketId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for MarketId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_id_is_lowercased() {
        assert_eq!(VenueId::new("Kalshi"), VenueId::kalshi());
        assert_eq!(VenueId::from(" POLYMARKET ").as_str(), "polymarket");
    }

    #[test]
    fn venue_id_deserializes_case_insensitively() {
        let id: VenueId = serde_json::from_str(r#""Polymarket""#).unwrap();
        assert_eq!(id, VenueId::polymarket());
    }

    #[test]
    fn venue_id_display() {
        assert_eq!(format!("{}", VenueId::kalshi()), "kalshi");
    }

    #[test]
    fn market_id_new_and_as_str() {
        let id = MarketId::new("KXFED-25DEC-T4.00");
        assert_eq!(id.as_str(), "KXFED-25DEC-T4.00");
    }

    #[test]
    fn market_id_keeps_case() {
        let id = MarketId::from("Fed-Rate-Cut");
        assert_eq!(id.to_string(), "Fed-Rate-Cut");
    }

    #[test]
    fn market_id_serializes_transparently() {
        let json = serde_json::to_string(&MarketId::from("abc")).unwrap();
        assert_eq!(json, r#""abc""#);
    }
}
