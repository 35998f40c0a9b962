//! Structural mismatch detection.
//!
//! Only the shape of each leg is checked. Label text on A is never compared
//! with label text on B; the mapping's polarity is trusted.

use crate::domain::{LegSide, MarketLeg, MarketPairMapping, MismatchReason, NormalizedQuote};

/// Check that both legs are clean binaries under the declared mapping.
///
/// Returns the first problem found, leg A before leg B.
#[must_use]
pub fn check_mismatch(
    quote_a: &NormalizedQuote,
    quote_b: &NormalizedQuote,
    mapping: &MarketPairMapping,
) -> Option<MismatchReason> {
    check_leg(quote_a, &mapping.a, LegSide::A).or_else(|| check_leg(quote_b, &mapping.b, LegSide::B))
}

fn check_leg(quote: &NormalizedQuote, leg: &MarketLeg, side: LegSide) -> Option<MismatchReason> {
    if !quote.is_binary() {
        return Some(MismatchReason::NonBinary {
            leg: side,
            count: quote.outcome_count(),
        });
    }

    let outcomes = quote.outcomes();
    if outcomes[0].has_label(outcomes[1].label()) {
        return Some(MismatchReason::AmbiguousLabels { leg: side });
    }

    if quote.position_of(&leg.yes_label).is_none() {
        return Some(MismatchReason::UnresolvedLabel {
            leg: side,
            label: leg.yes_label.clone(),
        });
    }

    None
}
