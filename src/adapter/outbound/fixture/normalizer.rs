//! Generic outcome-list schema.
//!
//! ```json
//! {"outcomes": [{"label": "Yes", "best_bid": 0.44, "best_ask": "0.46", "size": 120}]}
//! ```
//!
//! `outcomes` may also be a string holding that list.

use serde_json::Value;

use crate::application::normalize::{coerce_price, coerce_size, decode_list};
use crate::domain::{NormalizationError, NormalizedQuote, OutcomeQuote, RawQuote};
use crate::port::QuoteNormalizer;

#[derive(Debug, Default, Clone, Copy)]
pub struct GenericNormalizer;

impl QuoteNormalizer for GenericNormalizer {
    fn schema(&self) -> &'static str {
        "generic"
    }

    fn normalize(&self, raw: &RawQuote) -> Result<NormalizedQuote, NormalizationError> {
        let field = raw
            .payload
            .get("outcomes")
            .ok_or_else(|| NormalizationError::MalformedPayload("missing 'outcomes'".into()))?;

        let outcomes = decode_list(field, "outcomes")?
            .iter()
            .map(outcome)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NormalizedQuote::new(
            raw.venue.clone(),
            raw.market_id.clone(),
            outcomes,
            raw.fetched_at,
        ))
    }
}

fn outcome(entry: &Value) -> Result<OutcomeQuote, NormalizationError> {
    let label = entry
        .get("label")
        .and_then(Value::as_str)
        .ok_or_else(|| NormalizationError::MalformedOutcomes("outcome without a label".into()))?;

    Ok(OutcomeQuote::new(
        label,
        coerce_price(entry.get("best_bid")),
        coerce_price(entry.get("best_ask")),
        coerce_size(entry.get("size")),
    ))
}
