//! Scan cycle orchestration.
//!
//! One cycle resolves the pairs for the active mode, fetches both venues of
//! every pair concurrently under a global request limit and a shared
//! deadline, runs the detection engine on each pair independently, and
//! returns the ranked candidates plus skip counts.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, info};
use uuid::Uuid;

use super::buffer::apply_buffer;
use super::evaluator::{classify, evaluate, is_alert, Signal};
use super::hedge::compute_hedge;
use super::mismatch::check_mismatch;
use super::normalize::NormalizerRegistry;
use super::resolver::resolve;
use crate::config::{ScanConfig, ScanPolicy};
use crate::domain::{
    Candidate, LegSide, MappingTable, MarketLeg, MarketPairMapping, NormalizedQuote, PairError,
    RawQuote, ScanMode, SkipReason,
};
use crate::port::QuoteFetcher;

/// Result of one scan cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub run_id: Uuid,
    pub mode: ScanMode,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Pairs resolved for this cycle.
    pub pairs_scanned: usize,
    /// Candidates computed before alert-only filtering.
    pub evaluated: usize,
    /// Emitted candidates, best net edge first.
    pub candidates: Vec<Candidate>,
    /// Pairs that produced no candidate, by cause.
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl CycleReport {
    #[must_use]
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    #[must_use]
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Candidates that pass the alert rule under `policy`.
    pub fn alerts<'a>(&'a self, policy: &'a ScanPolicy) -> impl Iterator<Item = &'a Candidate> {
        self.candidates.iter().filter(move |c| is_alert(c, policy))
    }
}

/// Runs scan cycles against a quote fetcher.
pub struct Scanner {
    fetcher: Arc<dyn QuoteFetcher>,
    normalizers: NormalizerRegistry,
    limiter: Arc<Semaphore>,
    max_concurrency: usize,
    cycle_timeout: Duration,
}

impl Scanner {
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn QuoteFetcher>,
        normalizers: NormalizerRegistry,
        config: &ScanConfig,
    ) -> Self {
        let max_concurrency = config.max_concurrency.max(1);
        Self {
            fetcher,
            normalizers,
            limiter: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
            cycle_timeout: config.cycle_timeout(),
        }
    }

    #[must_use]
    pub const fn cycle_timeout(&self) -> Duration {
        self.cycle_timeout
    }

    /// Run one full cycle.
    ///
    /// Never fails: every per-pair problem becomes a skip count.
    pub async fn run_cycle(&self, mappings: Option<&MappingTable>, policy: &ScanPolicy) -> CycleReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let pairs = resolve(policy.mode, mappings);
        let deadline = Instant::now() + self.cycle_timeout;

        info!(
            %run_id,
            mode = %policy.mode,
            pairs = pairs.len(),
            fetcher = self.fetcher.name(),
            "Starting scan cycle"
        );

        let results: Vec<(&MarketPairMapping, Result<Candidate, PairError>)> = stream::iter(pairs.iter())
            .map(|mapping| async move { (mapping, self.scan_pair(mapping, policy, deadline).await) })
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let mut candidates = Vec::with_capacity(results.len());
        let mut skipped: BTreeMap<SkipReason, usize> = BTreeMap::new();

        for (mapping, result) in results {
            match result {
                Ok(candidate) => {
                    log_candidate(&candidate, policy);
                    candidates.push(candidate);
                }
                Err(err) => {
                    log_skip(mapping, &err, policy);
                    *skipped.entry(err.reason()).or_default() += 1;
                }
            }
        }

        candidates.sort_by(rank);
        let evaluated = candidates.len();
        if policy.alert_only {
            candidates.retain(|c| is_alert(c, policy));
        }

        let report = CycleReport {
            run_id,
            mode: policy.mode,
            started_at,
            finished_at: Utc::now(),
            pairs_scanned: pairs.len(),
            evaluated,
            candidates,
            skipped,
        };

        info!(
            %run_id,
            pairs = report.pairs_scanned,
            evaluated = report.evaluated,
            emitted = report.candidates.len(),
            alerts = report.alerts(policy).count(),
            skipped = report.skipped_total(),
            "Scan cycle complete"
        );

        report
    }

    async fn scan_pair(
        &self,
        mapping: &MarketPairMapping,
        policy: &ScanPolicy,
        deadline: Instant,
    ) -> Result<Candidate, PairError> {
        let (raw_a, raw_b) = timeout_at(deadline, async {
            tokio::join!(self.fetch(&mapping.a), self.fetch(&mapping.b))
        })
        .await
        .map_err(|_| PairError::FetchTimeout)?;

        let quote_a = self.normalize(&raw_a?, LegSide::A)?;
        let quote_b = self.normalize(&raw_b?, LegSide::B)?;

        let mismatch = check_mismatch(&quote_a, &quote_b, mapping);
        let hedge = compute_hedge(&quote_a, &quote_b, mapping)?;
        let fees = apply_buffer(hedge.hedge_cost, policy.buffer_bps);
        let net_edge = evaluate(&hedge, fees)?;

        Ok(Candidate::new(
            mapping.key(),
            mapping.tier,
            &hedge,
            fees,
            net_edge,
            mismatch,
        ))
    }

    async fn fetch(&self, leg: &MarketLeg) -> Result<RawQuote, PairError> {
        let _permit = self.limiter.acquire().await.ok();
        self.fetcher
            .fetch_quote(&leg.venue, &leg.market_id)
            .await
            .map_err(|e| PairError::Fetch {
                venue: leg.venue.clone(),
                market: leg.market_id.clone(),
                message: e.to_string(),
            })
    }

    fn normalize(&self, raw: &RawQuote, leg: LegSide) -> Result<NormalizedQuote, PairError> {
        self.normalizers
            .normalize(raw)
            .map_err(|source| PairError::Normalization {
                leg,
                venue: raw.venue.clone(),
                market: raw.market_id.clone(),
                source,
            })
    }
}

/// Best net edge first; ties broken by pair text for a stable order.
fn rank(a: &Candidate, b: &Candidate) -> Ordering {
    b.net_edge()
        .cmp(&a.net_edge())
        .then_with(|| a.market_pair().to_string().cmp(&b.market_pair().to_string()))
}

fn log_candidate(candidate: &Candidate, policy: &ScanPolicy) {
    let pair = candidate.market_pair();
    match classify(candidate, policy) {
        Signal::Alert => info!(
            %pair,
            net_edge = %candidate.net_edge(),
            hedge_cost = %candidate.hedge_cost(),
            liquidity = %candidate.top_of_book_liquidity(),
            "Opportunity detected"
        ),
        Signal::NearMiss if !policy.alert_only => info!(
            %pair,
            net_edge = %candidate.net_edge(),
            threshold = %policy.alert_threshold,
            "Near miss"
        ),
        signal => debug!(
            %pair,
            net_edge = %candidate.net_edge(),
            signal = %signal,
            mismatch = candidate.mismatch_reason().map(|r| r.code()),
            "Candidate evaluated"
        ),
    }
}

fn log_skip(mapping: &MarketPairMapping, err: &PairError, policy: &ScanPolicy) {
    let pair = mapping.key();
    let reason = err.reason();
    if matches!(err, PairError::DegenerateHedge { .. }) {
        error!(%pair, %reason, error = %err, "Degenerate hedge, check upstream quotes");
    } else if policy.alert_only {
        debug!(%pair, %reason, error = %err, "Pair skipped");
    } else {
        info!(%pair, %reason, error = %err, "Pair skipped");
    }
}
