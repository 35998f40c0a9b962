//! Net edge evaluation and alert classification.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::ScanPolicy;
use crate::domain::{Candidate, HedgeResult, PairError, Price};

/// Fractional return on capital after the fee buffer.
///
/// `net_edge = (payout - hedge_cost - fees) / (hedge_cost + fees)`.
///
/// # Errors
///
/// Returns [`PairError::DegenerateHedge`] when the capital basis is not
/// positive.
pub fn evaluate(hedge: &HedgeResult, estimated_fees: Price) -> Result<Decimal, PairError> {
    let capital = hedge.hedge_cost + estimated_fees;
    if capital <= Decimal::ZERO {
        return Err(PairError::DegenerateHedge { capital });
    }
    Ok((hedge.guaranteed_payout - capital) / capital)
}

/// Whether a candidate passes the alert rule.
#[must_use]
pub fn is_alert(candidate: &Candidate, policy: &ScanPolicy) -> bool {
    !candidate.market_mismatch()
        && candidate.net_edge() >= policy.alert_threshold
        && candidate.top_of_book_liquidity() >= policy.min_exec_size
}

/// Observability label for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Passes the alert rule.
    Alert,
    /// Clean, just below the alert threshold.
    NearMiss,
    /// Hedge economics unreliable.
    Mismatch,
    /// Nothing of note.
    Quiet,
}

impl Signal {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::NearMiss => "near_miss",
            Self::Mismatch => "mismatch",
            Self::Quiet => "-",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a candidate against the policy.
///
/// Near misses are clean candidates with `net_edge` in
/// `[near_miss_floor, alert_threshold)`.
#[must_use]
pub fn classify(candidate: &Candidate, policy: &ScanPolicy) -> Signal {
    if candidate.market_mismatch() {
        return Signal::Mismatch;
    }
    if is_alert(candidate, policy) {
        return Signal::Alert;
    }
    let edge = candidate.net_edge();
    if edge >= policy.near_miss_floor() && edge < policy.alert_threshold {
        Signal::NearMiss
    } else {
        Signal::Quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LegSide, MarketId, MismatchReason, PairKey, Tier, VenueId};
    use rust_decimal_macros::dec;

    fn hedge(cost: Decimal, liquidity: Decimal) -> HedgeResult {
        HedgeResult {
            leg_a_price: cost / dec!(2),
            leg_b_price: cost / dec!(2),
            hedge_cost: cost,
            guaranteed_payout: Decimal::ONE,
            top_of_book_liquidity: liquidity,
        }
    }

    fn candidate(edge: Decimal, liquidity: Decimal, mismatch: Option<MismatchReason>) -> Candidate {
        let key = PairKey {
            venue_a: VenueId::kalshi(),
            market_a: MarketId::from("K"),
            venue_b: VenueId::polymarket(),
            market_b: MarketId::from("p"),
        };
        Candidate::new(key, Tier::Safe, &hedge(dec!(0.9), liquidity), dec!(0), edge, mismatch)
    }

    #[test]
    fn worked_example_net_edge() {
        let fees = dec!(0.002375);
        let edge = evaluate(&hedge(dec!(0.95), dec!(50)), fees).unwrap();
        assert!((edge - dec!(0.0500)).abs() < dec!(0.0001), "{edge}");
    }

    #[test]
    fn edge_can_be_negative() {
        let edge = evaluate(&hedge(dec!(1.02), dec!(5)), dec!(0)).unwrap();
        assert!(edge < Decimal::ZERO);
    }

    #[test]
    fn non_positive_capital_is_degenerate() {
        let err = evaluate(&hedge(dec!(0), dec!(5)), dec!(0)).unwrap_err();
        assert_eq!(err, PairError::DegenerateHedge { capital: dec!(0) });

        let err = evaluate(&hedge(dec!(-0.1), dec!(5)), dec!(0.01)).unwrap_err();
        assert!(matches!(err, PairError::DegenerateHedge { .. }));
    }

    #[test]
    fn edge_decreases_as_buffer_grows() {
        let h = hedge(dec!(0.95), dec!(50));
        let edges: Vec<Decimal> = [0u32, 10, 25, 100, 500]
            .iter()
            .map(|bps| evaluate(&h, crate::application::apply_buffer(h.hedge_cost, *bps)).unwrap())
            .collect();
        assert!(edges.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn alert_requires_threshold_clean_pair_and_size() {
        let policy = ScanPolicy::default();
        assert!(is_alert(&candidate(dec!(0.05), dec!(50), None), &policy));
        assert!(is_alert(&candidate(dec!(0.02), dec!(50), None), &policy));
        assert!(!is_alert(&candidate(dec!(0.019), dec!(50), None), &policy));

        let mismatch = MismatchReason::NonBinary {
            leg: LegSide::B,
            count: 3,
        };
        assert!(!is_alert(&candidate(dec!(0.5), dec!(50), Some(mismatch)), &policy));

        let mut policy = ScanPolicy::default();
        policy.min_exec_size = dec!(100);
        assert!(!is_alert(&candidate(dec!(0.05), dec!(50), None), &policy));
    }

    #[test]
    fn classifies_near_miss_band() {
        let policy = ScanPolicy::default();
        assert_eq!(classify(&candidate(dec!(0.03), dec!(1), None), &policy), Signal::Alert);
        assert_eq!(classify(&candidate(dec!(0.01), dec!(1), None), &policy), Signal::NearMiss);
        assert_eq!(classify(&candidate(dec!(-0.01), dec!(1), None), &policy), Signal::NearMiss);
        assert_eq!(classify(&candidate(dec!(-0.02), dec!(1), None), &policy), Signal::Quiet);

        let safe = ScanPolicy::default().with_mode(crate::domain::ScanMode::Safe);
        assert_eq!(classify(&candidate(dec!(-0.008), dec!(1), None), &safe), Signal::Quiet);
    }
}
