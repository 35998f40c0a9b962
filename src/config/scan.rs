//! Scan cycle settings.

use std::time::Duration;

use serde::Deserialize;

/// Scan cycle configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Maximum quote fetches, and live venue requests, in flight at once.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Deadline for all fetches of one cycle (milliseconds).
    #[serde(default = "default_cycle_timeout_ms")]
    pub cycle_timeout_ms: u64,
    /// Pause between cycles in daemon mode (seconds).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Backoff after a failed cycle, first step (seconds).
    #[serde(default = "default_backoff_base_secs")]
    pub backoff_base_secs: u64,
    /// Backoff ceiling (seconds).
    #[serde(default = "default_backoff_max_secs")]
    pub backoff_max_secs: u64,
}

const fn default_max_concurrency() -> usize {
    8
}

const fn default_cycle_timeout_ms() -> u64 {
    10_000
}

const fn default_interval_secs() -> u64 {
    60
}

const fn default_backoff_base_secs() -> u64 {
    30
}

const fn default_backoff_max_secs() -> u64 {
    600
}

impl ScanConfig {
    #[must_use]
    pub const fn cycle_timeout(&self) -> Duration {
        Duration::from_millis(self.cycle_timeout_ms)
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            cycle_timeout_ms: default_cycle_timeout_ms(),
            interval_secs: default_interval_secs(),
            backoff_base_secs: default_backoff_base_secs(),
            backoff_max_secs: default_backoff_max_secs(),
        }
    }
}
