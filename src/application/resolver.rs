//! Tiered market-pair resolution.
//!
//! SAFE mappings are vetted and always scanned. LAB mappings are
//! speculative and only join in LAB mode, and never override SAFE.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{MappingTable, MarketId, MarketPairMapping, PairKey, ScanMode, VenueId};

/// Resolve the pairs to scan for a mode.
///
/// Output is SAFE entries in table order followed by the surviving LAB
/// entries in table order. A LAB entry is dropped when its pair repeats a
/// SAFE pair or when either of its markets is already covered by SAFE.
/// Within a tier the first occurrence of a pair wins. A missing table is
/// an empty result.
#[must_use]
pub fn resolve(mode: ScanMode, table: Option<&MappingTable>) -> Vec<MarketPairMapping> {
    let Some(table) = table else {
        return Vec::new();
    };

    let mut seen: HashSet<PairKey> = HashSet::new();
    let mut safe_markets: HashSet<(VenueId, MarketId)> = HashSet::new();
    let mut resolved = Vec::with_capacity(table.len());

    for mapping in table.safe() {
        if !seen.insert(mapping.key()) {
            debug!(pair = %mapping.key(), "Duplicate SAFE mapping ignored");
            continue;
        }
        safe_markets.extend(mapping.markets());
        resolved.push(mapping.clone());
    }

    if mode == ScanMode::Lab {
        for mapping in table.lab() {
            let key = mapping.key();
            if seen.contains(&key) {
                debug!(pair = %key, "LAB mapping shadowed by SAFE or earlier LAB entry");
                continue;
            }
            if mapping.markets().iter().any(|m| safe_markets.contains(m)) {
                debug!(pair = %key, "LAB mapping references a SAFE market, ignored");
                continue;
            }
            seen.insert(key);
            resolved.push(mapping.clone());
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketLeg, Polarity, Tier};

    fn pair(a: &str, b: &str, tier: Tier) -> MarketPairMapping {
        MarketPairMapping::new(
            MarketLeg::new("kalshi", a),
            MarketLeg::new("polymarket", b),
            Polarity::Same,
            tier,
        )
    }

    fn table() -> MappingTable {
        MappingTable::new(
            vec![pair("K1", "p1", Tier::Safe), pair("K2", "p2", Tier::Safe)],
            vec![
                pair("K3", "p3", Tier::Lab),
                pair("K1", "p1", Tier::Lab),
                pair("K1", "p9", Tier::Lab),
            ],
        )
    }

    fn markets(resolved: &[MarketPairMapping]) -> Vec<String> {
        resolved.iter().map(|m| m.a.market_id.to_string()).collect()
    }

    #[test]
    fn safe_mode_returns_safe_only() {
        let resolved = resolve(ScanMode::Safe, Some(&table()));
        assert_eq!(markets(&resolved), vec!["K1", "K2"]);
        assert!(resolved.iter().all(|m| m.tier == Tier::Safe));
    }

    #[test]
    fn lab_mode_overlays_lab_without_overriding_safe() {
        let resolved = resolve(ScanMode::Lab, Some(&table()));
        assert_eq!(markets(&resolved), vec!["K1", "K2", "K3"]);
        assert_eq!(resolved[0].tier, Tier::Safe);
        assert_eq!(resolved[2].tier, Tier::Lab);
    }

    #[test]
    fn missing_table_is_empty() {
        assert!(resolve(ScanMode::Lab, None).is_empty());
        assert!(resolve(ScanMode::Safe, Some(&MappingTable::default())).is_empty());
    }

    #[test]
    fn duplicates_within_tier_keep_first() {
        let mut first = pair("K1", "p1", Tier::Safe);
        first.polarity = Polarity::Inverse;
        let table = MappingTable::new(vec![first, pair("K1", "p1", Tier::Safe)], vec![]);
        let resolved = resolve(ScanMode::Safe, Some(&table));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].polarity, Polarity::Inverse);
    }
}
