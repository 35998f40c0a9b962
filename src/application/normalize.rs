//! Venue payload normalization.
//!
//! Venue clients hand back raw JSON; a [`QuoteNormalizer`] per schema turns
//! it into a [`NormalizedQuote`]. The registry picks the normalizer by venue
//! id so the scanner never knows which venues exist.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::{is_probability, NormalizationError, NormalizedQuote, Price, RawQuote, VenueId, Volume};
use crate::port::QuoteNormalizer;

/// Normalizers keyed by venue.
#[derive(Default, Clone)]
pub struct NormalizerRegistry {
    normalizers: HashMap<VenueId, Arc<dyn QuoteNormalizer>>,
}

impl NormalizerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the normalizer for a venue.
    pub fn register(&mut self, venue: impl Into<VenueId>, normalizer: Arc<dyn QuoteNormalizer>) {
        self.normalizers.insert(venue.into(), normalizer);
    }

    #[must_use]
    pub fn with(mut self, venue: impl Into<VenueId>, normalizer: Arc<dyn QuoteNormalizer>) -> Self {
        self.register(venue, normalizer);
        self
    }

    /// Normalize a raw quote with the schema registered for its venue.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizationError::UnsupportedVenue`] for unregistered
    /// venues, or whatever the venue normalizer rejects.
    pub fn normalize(&self, raw: &RawQuote) -> Result<NormalizedQuote, NormalizationError> {
        let normalizer = self
            .normalizers
            .get(&raw.venue)
            .ok_or_else(|| NormalizationError::UnsupportedVenue(raw.venue.clone()))?;
        normalizer.normalize(raw)
    }

    /// Schema name registered for a venue, if any.
    #[must_use]
    pub fn schema_for(&self, venue: &VenueId) -> Option<&'static str> {
        self.normalizers.get(venue).map(|n| n.schema())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }
}

/// Decode a list that may arrive either as JSON or as a string holding JSON.
///
/// # Errors
///
/// Returns [`NormalizationError::MalformedOutcomes`] if the value is neither
/// a list nor a string that parses to one.
pub fn decode_list(value: &Value, field: &str) -> Result<Vec<Value>, NormalizationError> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(other) => Err(NormalizationError::MalformedOutcomes(format!(
                "{field}: string does not hold a list (found {})",
                kind(&other)
            ))),
            Err(e) => Err(NormalizationError::MalformedOutcomes(format!(
                "{field}: {e}"
            ))),
        },
        other => Err(NormalizationError::MalformedOutcomes(format!(
            "{field}: expected a list, found {}",
            kind(other)
        ))),
    }
}

/// Coerce a number or numeric string into a `Decimal`.
#[must_use]
pub fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

/// Coerce a price; anything not strictly inside (0, 1) is absent.
#[must_use]
pub fn coerce_price(value: Option<&Value>) -> Option<Price> {
    value.and_then(coerce_decimal).filter(|p| is_probability(*p))
}

/// Coerce a size; missing, non-numeric or negative sizes become 0.
#[must_use]
pub fn coerce_size(value: Option<&Value>) -> Volume {
    value
        .and_then(coerce_decimal)
        .filter(|s| *s >= Decimal::ZERO)
        .unwrap_or(Decimal::ZERO)
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
