//! Hedge cost calculation.
//!
//! Buying YES on venue A plus the complementary leg on venue B pays out
//! exactly one unit whichever way the event resolves. The polarity of the
//! mapping decides whether the complement is NO or YES on B.

use rust_decimal::Decimal;

use crate::domain::{
    HedgeResult, MarketLeg, MarketPairMapping, NormalizedQuote, OutcomeQuote, PairError, Side,
};

const NO_LABEL: &str = "No";

/// Compute the hedge economics for a mapped pair.
///
/// # Errors
///
/// Returns [`PairError::InsufficientData`] when either required leg has no
/// ask at the top of book.
pub fn compute_hedge(
    quote_a: &NormalizedQuote,
    quote_b: &NormalizedQuote,
    mapping: &MarketPairMapping,
) -> Result<HedgeResult, PairError> {
    let (price_a, size_a) = leg_ask(quote_a, &mapping.a, Side::Yes)?;
    let (price_b, size_b) = leg_ask(quote_b, &mapping.b, mapping.polarity.complement_side())?;

    Ok(HedgeResult {
        leg_a_price: price_a,
        leg_b_price: price_b,
        hedge_cost: price_a + price_b,
        guaranteed_payout: Decimal::ONE,
        top_of_book_liquidity: size_a.min(size_b),
    })
}

fn leg_ask(
    quote: &NormalizedQuote,
    leg: &MarketLeg,
    side: Side,
) -> Result<(Decimal, Decimal), PairError> {
    select_outcome(quote, &leg.yes_label, side)
        .and_then(|o| o.best_ask().map(|ask| (ask, o.top_of_book_size())))
        .ok_or_else(|| PairError::InsufficientData {
            venue: quote.venue_id().clone(),
            market: quote.market_id().clone(),
            side: match side {
                Side::Yes => "YES",
                Side::No => "NO",
            },
        })
}

/// Pick the outcome that plays `side` in a quote.
///
/// YES is the outcome carrying the declared label, else the first one. NO
/// is the outcome labelled "No", else the first outcome that is not YES.
#[must_use]
pub fn select_outcome<'a>(
    quote: &'a NormalizedQuote,
    yes_label: &str,
    side: Side,
) -> Option<&'a OutcomeQuote> {
    let outcomes = quote.outcomes();
    let yes_index = quote.position_of(yes_label).unwrap_or(0);
    match side {
        Side::Yes => outcomes.get(yes_index),
        Side::No => quote
            .position_of(NO_LABEL)
            .filter(|&i| i != yes_index)
            .or_else(|| (0..outcomes.len()).find(|&i| i != yes_index))
            .and_then(|i| outcomes.get(i)),
    }
}
