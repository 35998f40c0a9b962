//! Polymarket payload to normalized quote.

use rust_decimal::Decimal;
use serde_json::Value;

use super::dto::{BookLevel, BookResponse, QuotePayload};
use crate::application::normalize::{coerce_price, coerce_size, decode_list};
use crate::domain::{NormalizationError, NormalizedQuote, OutcomeQuote, Price, RawQuote, Volume};
use crate::port::QuoteNormalizer;

/// Normalizer for the Gamma market + CLOB books envelope.
#[derive(Debug, Default, Clone, Copy)]
pub struct PolymarketNormalizer;

impl QuoteNormalizer for PolymarketNormalizer {
    fn schema(&self) -> &'static str {
        "polymarket"
    }

    fn normalize(&self, raw: &RawQuote) -> Result<NormalizedQuote, NormalizationError> {
        let payload: QuotePayload = serde_json::from_value(raw.payload.clone())
            .map_err(|e| NormalizationError::MalformedPayload(format!("polymarket quote: {e}")))?;

        let labels = decode_list(&payload.market.outcomes, "outcomes")?;
        let tokens = token_ids(&payload.market.clob_token_ids)?;
        if tokens.len() != labels.len() {
            return Err(NormalizationError::MalformedPayload(format!(
                "polymarket quote: {} token ids for {} outcomes",
                tokens.len(),
                labels.len()
            )));
        }

        let outcomes = labels
            .iter()
            .zip(&tokens)
            .map(|(label, token)| {
                let label = match label {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                let book = payload
                    .books
                    .iter()
                    .find(|book| book.asset_id.as_deref() == Some(token.as_str()));
                match book {
                    Some(book) => outcome_from_book(label, book),
                    None => OutcomeQuote::new(label, None, None, Volume::ZERO),
                }
            })
            .collect();

        Ok(NormalizedQuote::new(
            raw.venue.clone(),
            raw.market_id.clone(),
            outcomes,
            raw.fetched_at,
        ))
    }
}

/// Decode `clobTokenIds`: one non-empty string per outcome, in outcome order.
pub(crate) fn token_ids(raw: &Value) -> Result<Vec<String>, NormalizationError> {
    decode_list(raw, "clobTokenIds")?
        .into_iter()
        .map(|id| match id {
            Value::String(s) if !s.is_empty() => Ok(s),
            other => Err(NormalizationError::MalformedPayload(format!(
                "clobTokenIds: {other} is not a token id"
            ))),
        })
        .collect()
}

fn outcome_from_book(label: String, book: &BookResponse) -> OutcomeQuote {
    let best_bid = book
        .bids
        .iter()
        .filter_map(|level| coerce_price(Some(&level.price)))
        .max();
    let ask = best_ask(&book.asks);

    OutcomeQuote::new(
        label,
        best_bid,
        ask.map(|(price, _)| price),
        ask.map_or(Volume::ZERO, |(_, size)| size),
    )
}

/// Lowest ask with its size. CLOB ask order is not relied on.
fn best_ask(levels: &[BookLevel]) -> Option<(Price, Volume)> {
    levels
        .iter()
        .filter_map(|level| {
            let price = coerce_price(Some(&level.price))?;
            let size = coerce_size(Some(&level.size));
            (size > Decimal::ZERO).then_some((price, size))
        })
        .min_by(|a, b| a.0.cmp(&b.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketId, VenueId};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn raw(payload: Value) -> RawQuote {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        RawQuote::new(VenueId::polymarket(), MarketId::from("btc-100k"), payload, at)
    }

    fn payload(outcomes: Value) -> Value {
        json!({
            "market": {
                "slug": "btc-100k",
                "outcomes": outcomes,
                "clobTokenIds": "[\"t-yes\", \"t-no\"]"
            },
            "books": [
                {
                    "asset_id": "t-yes",
                    "bids": [{"price": "0.58", "size": "40"}, {"price": "0.60", "size": "10"}],
                    "asks": [{"price": "0.66", "size": "5"}, {"price": "0.62", "size": "25"}]
                },
                {
                    "asset_id": "t-no",
                    "bids": [{"price": "0.36", "size": "12"}],
                    "asks": [{"price": "0.40", "size": "50"}]
                }
            ]
        })
    }

    #[test]
    fn best_levels_are_taken_from_books() {
        let quote = PolymarketNormalizer.normalize(&raw(payload(json!(["Yes", "No"])))).unwrap();

        let yes = &quote.outcomes()[0];
        assert_eq!(yes.label(), "Yes");
        assert_eq!(yes.best_bid(), Some(dec!(0.60)));
        assert_eq!(yes.best_ask(), Some(dec!(0.62)));
        assert_eq!(yes.top_of_book_size(), dec!(25));

        let no = &quote.outcomes()[1];
        assert_eq!(no.best_ask(), Some(dec!(0.40)));
        assert_eq!(no.top_of_book_size(), dec!(50));
    }

    #[test]
    fn encoded_outcomes_match_native_list() {
        let native = PolymarketNormalizer.normalize(&raw(payload(json!(["Yes", "No"])))).unwrap();
        let encoded = PolymarketNormalizer
            .normalize(&raw(payload(json!("[\"Yes\", \"No\"]"))))
            .unwrap();
        assert_eq!(native, encoded);
    }

    #[test]
    fn malformed_outcome_string_is_rejected() {
        let err = PolymarketNormalizer
            .normalize(&raw(payload(json!("Yes / No"))))
            .unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedOutcomes(_)));
    }

    #[test]
    fn books_attach_by_token_id_not_position() {
        let payload = json!({
            "market": {"outcomes": ["Yes", "No"], "clobTokenIds": ["t-yes", "t-no"]},
            "books": [
                {"asset_id": "t-no", "asks": [{"price": "0.40", "size": "50"}]},
                {"asset_id": "t-yes", "asks": [{"price": "0.62", "size": "25"}]}
            ]
        });
        let quote = PolymarketNormalizer.normalize(&raw(payload)).unwrap();
        assert_eq!(quote.outcomes()[0].best_ask(), Some(dec!(0.62)));
        assert_eq!(quote.outcomes()[1].best_ask(), Some(dec!(0.40)));
    }

    #[test]
    fn missing_book_leaves_outcome_unpriced() {
        let payload = json!({
            "market": {"outcomes": ["Yes", "No", "Void"], "clobTokenIds": ["t-yes", "t-no", "t-void"]},
            "books": [{"asset_id": "t-no", "asks": [{"price": "0.5", "size": "1"}]}]
        });
        let quote = PolymarketNormalizer.normalize(&raw(payload)).unwrap();
        assert_eq!(quote.outcome_count(), 3);
        assert_eq!(quote.outcomes()[0].best_ask(), None);
        assert_eq!(quote.outcomes()[1].best_ask(), Some(dec!(0.5)));
        assert_eq!(quote.outcomes()[2].best_ask(), None);
    }

    #[test]
    fn unusable_token_ids_are_rejected() {
        for tokens in [json!([null, "t-no"]), json!(["t-yes"]), json!(["t-yes", ""]), json!(null)] {
            let payload = json!({
                "market": {"outcomes": ["Yes", "No"], "clobTokenIds": tokens.clone()},
                "books": [{"asset_id": "t-no", "asks": [{"price": "0.40", "size": "50"}]}]
            });
            let err = PolymarketNormalizer.normalize(&raw(payload)).unwrap_err();
            assert!(
                matches!(
                    err,
                    NormalizationError::MalformedPayload(_) | NormalizationError::MalformedOutcomes(_)
                ),
                "{tokens}: {err:?}"
            );
        }
    }

    #[test]
    fn token_ids_accept_list_or_encoded_list() {
        assert_eq!(token_ids(&json!("[\"1\", \"2\"]")).unwrap(), vec!["1", "2"]);
        assert_eq!(token_ids(&json!(["a", "b"])).unwrap(), vec!["a", "b"]);
        assert!(token_ids(&json!(["1", 2])).is_err());
        assert!(token_ids(&json!("garbage")).is_err());
    }

    #[test]
    fn out_of_range_prices_are_dropped() {
        let payload = json!({
            "market": {"outcomes": ["Yes", "No"], "clobTokenIds": ["t-yes", "t-no"]},
            "books": [
                {"asset_id": "t-yes", "asks": [{"price": "1.00", "size": "10"}]},
                {
                    "asset_id": "t-no",
                    "asks": [{"price": "abc", "size": "10"}],
                    "bids": [{"price": "0", "size": "3"}]
                }
            ]
        });
        let quote = PolymarketNormalizer.normalize(&raw(payload)).unwrap();
        assert_eq!(quote.outcomes()[0].best_ask(), None);
        assert_eq!(quote.outcomes()[1].best_ask(), None);
        assert_eq!(quote.outcomes()[1].best_bid(), None);
    }
}
