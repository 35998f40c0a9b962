use std::sync::Arc;

use arbscan::application::Scanner;
use arbscan::config::ScanConfig;
use arbscan::domain::{MappingTable, Tier, VenueId};
use arbscan::testkit::domain::{binary_payload, generic_registry, pair, table};
use arbscan::testkit::fetcher::ScriptedFetcher;
use rust_decimal_macros::dec;

pub const WORKED_A: &str = "KXBTC-100K";
pub const WORKED_B: &str = "btc-above-100k";

/// YES 0.55 x 100 on Kalshi, NO 0.40 x 50 on Polymarket.
pub fn worked_example_fetcher() -> ScriptedFetcher {
    ScriptedFetcher::new()
        .with_payload(
            VenueId::kalshi(),
            WORKED_A,
            binary_payload(dec!(0.55), dec!(100), dec!(0.47), dec!(80)),
        )
        .with_payload(
            VenueId::polymarket(),
            WORKED_B,
            binary_payload(dec!(0.62), dec!(70), dec!(0.40), dec!(50)),
        )
}

pub fn worked_example_table() -> MappingTable {
    table(vec![pair(WORKED_A, WORKED_B, Tier::Safe)], vec![])
}

pub fn scanner(fetcher: ScriptedFetcher, config: &ScanConfig) -> Scanner {
    Scanner::new(Arc::new(fetcher), generic_registry(), config)
}
