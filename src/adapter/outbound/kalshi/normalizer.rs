//! Kalshi order book to normalized quote.

use rust_decimal::Decimal;
use serde_json::Value;

use super::dto::OrderbookResponse;
use crate::application::normalize::{coerce_decimal, coerce_size};
use crate::domain::{
    NormalizationError, NormalizedQuote, OutcomeQuote, Price, RawQuote, Volume,
};
use crate::port::QuoteNormalizer;

const CENTS_PER_DOLLAR: Decimal = Decimal::ONE_HUNDRED;

/// Best bid on one side of the book, with its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BestBid {
    price: Price,
    size: Volume,
}

/// Normalizer for the Kalshi order book schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct KalshiNormalizer;

impl QuoteNormalizer for KalshiNormalizer {
    fn schema(&self) -> &'static str {
        "kalshi"
    }

    fn normalize(&self, raw: &RawQuote) -> Result<NormalizedQuote, NormalizationError> {
        let response: OrderbookResponse = serde_json::from_value(raw.payload.clone())
            .map_err(|e| NormalizationError::MalformedPayload(format!("kalshi orderbook: {e}")))?;
        let book = response.orderbook;

        let yes_bid = best_bid(book.yes_dollars.as_deref(), book.yes.as_deref());
        let no_bid = best_bid(book.no_dollars.as_deref(), book.no.as_deref());

        let outcomes = vec![
            outcome("Yes", yes_bid, no_bid),
            outcome("No", no_bid, yes_bid),
        ];

        Ok(NormalizedQuote::new(
            raw.venue.clone(),
            raw.market_id.clone(),
            outcomes,
            raw.fetched_at,
        ))
    }
}

/// One side's quote: its own best bid, and an ask implied by the opposite
/// side's best bid.
fn outcome(label: &str, own: Option<BestBid>, opposite: Option<BestBid>) -> OutcomeQuote {
    OutcomeQuote::new(
        label,
        own.map(|b| b.price),
        opposite.map(|b| Decimal::ONE - b.price),
        opposite.map_or(Volume::ZERO, |b| b.size),
    )
}

/// Highest bid of a ladder, preferring the dollar-denominated one.
fn best_bid(dollars: Option<&[Vec<Value>]>, cents: Option<&[Vec<Value>]>) -> Option<BestBid> {
    match dollars {
        Some(levels) if !levels.is_empty() => best_level(levels, Decimal::ONE),
        _ => cents.and_then(|levels| best_level(levels, CENTS_PER_DOLLAR)),
    }
}

fn best_level(levels: &[Vec<Value>], divisor: Decimal) -> Option<BestBid> {
    levels
        .iter()
        .filter_map(|level| {
            let price = coerce_decimal(level.first()?)? / divisor;
            let size = coerce_size(level.get(1));
            (price > Decimal::ZERO && price < Decimal::ONE && size > Decimal::ZERO)
                .then_some(BestBid { price, size })
        })
        .max_by(|a, b| a.price.cmp(&b.price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketId, VenueId};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn raw(payload: Value) -> RawQuote {
        RawQuote::new(VenueId::kalshi(), MarketId::from("KXBTC"), payload, Utc::now())
    }

    #[test]
    fn asks_are_implied_by_opposite_bids() {
        let quote = KalshiNormalizer
            .normalize(&raw(json!({
                "orderbook": {
                    "yes": [[40, 10], [44, 100]],
                    "no": [[50, 30], [45, 50]]
                }
            })))
            .unwrap();

        assert!(quote.is_binary());
        let yes = &quote.outcomes()[0];
        let no = &quote.outcomes()[1];

        assert_eq!(yes.label(), "Yes");
        assert_eq!(yes.best_bid(), Some(dec!(0.44)));
        assert_eq!(yes.best_ask(), Some(dec!(0.50)));
        assert_eq!(yes.top_of_book_size(), dec!(30));

        assert_eq!(no.label(), "No");
        assert_eq!(no.best_bid(), Some(dec!(0.50)));
        assert_eq!(no.best_ask(), Some(dec!(0.56)));
        assert_eq!(no.top_of_book_size(), dec!(100));
    }

    #[test]
    fn dollar_ladders_win_over_cents() {
        let quote = KalshiNormalizer
            .normalize(&raw(json!({
                "orderbook": {
                    "yes": [[10, 1]],
                    "yes_dollars": [["0.4450", 20]],
                    "no_dollars": [["0.5300", 5]]
                }
            })))
            .unwrap();

        assert_eq!(quote.outcomes()[0].best_bid(), Some(dec!(0.445)));
        assert_eq!(quote.outcomes()[0].best_ask(), Some(dec!(0.47)));
        assert_eq!(quote.outcomes()[1].best_ask(), Some(dec!(0.555)));
    }

    #[test]
    fn null_ladder_leaves_ask_absent() {
        let quote = KalshiNormalizer
            .normalize(&raw(json!({"orderbook": {"yes": [[44, 100]], "no": null}})))
            .unwrap();

        let yes = &quote.outcomes()[0];
        assert_eq!(yes.best_ask(), None);
        assert_eq!(yes.top_of_book_size(), dec!(0));
        assert_eq!(quote.outcomes()[1].best_ask(), Some(dec!(0.56)));
    }

    #[test]
    fn malformed_levels_are_skipped() {
        let quote = KalshiNormalizer
            .normalize(&raw(json!({"orderbook": {"yes": [["x", 1], [], [30, -2], [41, 7]], "no": []}})))
            .unwrap();
        assert_eq!(quote.outcomes()[0].best_bid(), Some(dec!(0.41)));
    }

    #[test]
    fn non_object_payload_is_malformed() {
        let err = KalshiNormalizer.normalize(&raw(json!(["nope"]))).unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedPayload(_)));
    }
}
