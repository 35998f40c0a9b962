//! Repeating scan loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use super::backoff::Backoff;
use super::bootstrap::Components;
use crate::application::{CycleReport, Scanner};
use crate::config::{ScanConfig, ScanPolicy};
use crate::domain::{MappingTable, SkipReason};
use crate::error::Result;
use crate::port::MappingSource;

/// Drives scan cycles: once, or forever at a fixed interval.
pub struct ScanDaemon {
    scanner: Scanner,
    mappings: Arc<dyn MappingSource>,
    policy: ScanPolicy,
    interval: Duration,
    backoff: Backoff,
}

impl ScanDaemon {
    #[must_use]
    pub fn new(components: Components, policy: ScanPolicy, config: &ScanConfig) -> Self {
        Self {
            scanner: components.scanner,
            mappings: components.mappings,
            policy,
            interval: config.interval(),
            backoff: Backoff::from_config(config),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &ScanPolicy {
        &self.policy
    }

    /// Load mappings and run a single cycle.
    ///
    /// # Errors
    ///
    /// Fails only when the mapping table cannot be read or parsed.
    pub async fn run_once(&self) -> Result<CycleReport> {
        let table = self.load_mappings()?;
        Ok(self.scanner.run_cycle(table.as_ref(), &self.policy).await)
    }

    /// Run cycles until `on_report` fails or the task is cancelled.
    ///
    /// Mapping load failures and cycles where every pair failed to fetch
    /// back off before the next attempt. `on_report` errors are fatal.
    pub async fn run<F>(&mut self, mut on_report: F) -> Result<()>
    where
        F: FnMut(&CycleReport) -> Result<()>,
    {
        info!(
            mode = %self.policy.mode,
            interval_secs = self.interval.as_secs(),
            "Scan daemon started"
        );

        loop {
            let table = match self.load_mappings() {
                Ok(table) => table,
                Err(e) => {
                    let delay = self.backoff.next_delay();
                    warn!(
                        error = %e,
                        failures = self.backoff.failures(),
                        retry_in_secs = delay.as_secs(),
                        "Mapping load failed"
                    );
                    sleep(delay).await;
                    continue;
                }
            };

            let report = self.scanner.run_cycle(table.as_ref(), &self.policy).await;
            on_report(&report)?;

            let delay = if all_fetches_failed(&report) {
                let delay = self.backoff.next_delay();
                warn!(
                    pairs = report.pairs_scanned,
                    failures = self.backoff.failures(),
                    retry_in_secs = delay.as_secs(),
                    "No venue responded this cycle"
                );
                delay
            } else {
                self.backoff.reset();
                self.interval
            };
            sleep(delay).await;
        }
    }

    fn load_mappings(&self) -> Result<Option<MappingTable>> {
        self.mappings.load_mappings()
    }
}

/// Every resolved pair was lost to a fetch error or the cycle deadline.
fn all_fetches_failed(report: &CycleReport) -> bool {
    let fetch_failures =
        report.skipped_for(SkipReason::FetchError) + report.skipped_for(SkipReason::FetchTimeout);
    report.pairs_scanned > 0 && fetch_failures == report.pairs_scanned
}
