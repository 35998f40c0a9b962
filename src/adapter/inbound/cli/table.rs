//! Console rendering of cycle reports.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output;
use crate::application::{classify, CycleReport, Signal};
use crate::config::ScanPolicy;
use crate::domain::Candidate;

/// Printed when a cycle emits nothing.
pub const NO_OPPORTUNITIES: &str = "No opportunities found.";

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "Pair")]
    pair: String,
    #[tabled(rename = "Tier")]
    tier: &'static str,
    #[tabled(rename = "YES A")]
    yes_a: Decimal,
    #[tabled(rename = "Hedge B")]
    hedge_b: Decimal,
    #[tabled(rename = "Cost")]
    cost: Decimal,
    #[tabled(rename = "Fees")]
    fees: Decimal,
    #[tabled(rename = "Size")]
    size: Decimal,
    #[tabled(rename = "Net Edge")]
    net_edge: String,
    #[tabled(rename = "Signal")]
    signal: String,
}

impl CandidateRow {
    fn new(candidate: &Candidate, policy: &ScanPolicy) -> Self {
        let signal = classify(candidate, policy);
        let edge = format!("{:.2}%", candidate.net_edge() * Decimal::ONE_HUNDRED);
        let net_edge = if candidate.net_edge() > Decimal::ZERO {
            output::positive(edge)
        } else {
            output::negative(edge)
        };

        Self {
            pair: candidate.market_pair().to_string(),
            tier: candidate.tier().as_str(),
            yes_a: candidate.best_yes_price_a(),
            hedge_b: candidate.best_no_price_b(),
            cost: candidate.hedge_cost(),
            fees: candidate.estimated_fees().round_dp(6),
            size: candidate.top_of_book_liquidity(),
            net_edge,
            signal: styled_signal(signal, candidate),
        }
    }
}

fn styled_signal(signal: Signal, candidate: &Candidate) -> String {
    match signal {
        Signal::Alert => output::positive(signal),
        Signal::NearMiss => output::highlight(signal),
        Signal::Mismatch => {
            let code = candidate.mismatch_reason().map_or("", |r| r.code());
            output::negative(format!("{signal} ({code})"))
        }
        Signal::Quiet => output::muted(signal),
    }
}

/// Render candidates as a table, or `None` when there are none.
#[must_use]
pub fn render(candidates: &[Candidate], policy: &ScanPolicy) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }
    let rows: Vec<CandidateRow> = candidates
        .iter()
        .map(|c| CandidateRow::new(c, policy))
        .collect();
    Some(Table::new(rows).with(Style::rounded()).to_string())
}

/// Print one cycle report: a table and summary, or a JSON line.
pub fn print_report(report: &CycleReport, policy: &ScanPolicy) {
    if output::is_json() {
        output::json_output(json!({
            "command": "run",
            "report": report,
        }));
        return;
    }

    match render(&report.candidates, policy) {
        Some(table) => output::block(&table),
        None => output::note(NO_OPPORTUNITIES),
    }

    output::field("Pairs", report.pairs_scanned);
    output::field("Evaluated", report.evaluated);
    output::field("Alerts", report.alerts(policy).count());
    if let Some(skipped) = skipped_summary(report, policy) {
        output::field("Skipped", output::muted(skipped));
    }
}

/// Skip counts as `reason=count` pairs. Silent in alert-only mode.
fn skipped_summary(report: &CycleReport, policy: &ScanPolicy) -> Option<String> {
    if policy.alert_only || report.skipped_total() == 0 {
        return None;
    }
    Some(
        report
            .skipped
            .iter()
            .map(|(reason, count)| format!("{reason}={count}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HedgeResult, MarketId, MismatchReason, PairKey, SkipReason, Tier, VenueId};
    use rust_decimal_macros::dec;

    fn candidate(edge: Decimal, mismatch: Option<MismatchReason>) -> Candidate {
        let key = PairKey {
            venue_a: VenueId::kalshi(),
            market_a: MarketId::from("KXBTC"),
            venue_b: VenueId::polymarket(),
            market_b: MarketId::from("btc-above-100k"),
        };
        let hedge = HedgeResult {
            leg_a_price: dec!(0.55),
            leg_b_price: dec!(0.40),
            hedge_cost: dec!(0.95),
            guaranteed_payout: Decimal::ONE,
            top_of_book_liquidity: dec!(50),
        };
        Candidate::new(key, Tier::Safe, &hedge, dec!(0.002375), edge, mismatch)
    }

    #[test]
    fn empty_renders_nothing() {
        assert!(render(&[], &ScanPolicy::default()).is_none());
    }

    #[test]
    fn table_has_pair_edge_and_signal() {
        let table = render(&[candidate(dec!(0.05), None)], &ScanPolicy::default()).unwrap();
        assert!(table.contains("kalshi:KXBTC vs polymarket:btc-above-100k"));
        assert!(table.contains("5.00%"));
        assert!(table.contains("alert"));
        assert!(table.contains("safe"));
    }

    #[test]
    fn skipped_summary_is_silent_in_alert_only_mode() {
        let report = CycleReport {
            run_id: uuid::Uuid::nil(),
            mode: crate::domain::ScanMode::Lab,
            started_at: chrono::Utc::now(),
            finished_at: chrono::Utc::now(),
            pairs_scanned: 3,
            evaluated: 1,
            candidates: Vec::new(),
            skipped: [(SkipReason::FetchTimeout, 2)].into_iter().collect(),
        };

        let policy = ScanPolicy::default();
        let summary = skipped_summary(&report, &policy).unwrap();
        assert!(summary.contains("=2"), "{summary}");
        assert!(skipped_summary(&report, &policy.with_alert_only(true)).is_none());
    }

    #[test]
    fn mismatch_shows_reason_code() {
        let reason = MismatchReason::NonBinary {
            leg: crate::domain::LegSide::B,
            count: 3,
        };
        let table = render(&[candidate(dec!(0.05), Some(reason))], &ScanPolicy::default()).unwrap();
        assert!(table.contains("non_binary"));
    }
}
