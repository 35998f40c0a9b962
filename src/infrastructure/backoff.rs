//! Exponential backoff with jitter for failed cycles.

use std::time::Duration;

use rand::Rng;

use crate::config::ScanConfig;

/// Fraction of the delay added or removed at random.
const JITTER_FRACTION: f64 = 0.2;

/// Exponential backoff: `base * 2^(failures - 1)`, capped, then jittered
/// by up to 20% either way.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    failures: u32,
}

impl Backoff {
    #[must_use]
    pub const fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            failures: 0,
        }
    }

    #[must_use]
    pub const fn from_config(config: &ScanConfig) -> Self {
        Self::new(
            Duration::from_secs(config.backoff_base_secs),
            Duration::from_secs(config.backoff_max_secs),
        )
    }

    /// Record a failure and return how long to wait before retrying.
    pub fn next_delay(&mut self) -> Duration {
        self.failures = self.failures.saturating_add(1);
        jitter(self.base_delay())
    }

    /// Delay before jitter for the current failure count.
    #[must_use]
    pub fn base_delay(&self) -> Duration {
        let exponent = self.failures.saturating_sub(1).min(31);
        self.base
            .saturating_mul(2u32.saturating_pow(exponent))
            .min(self.max)
    }

    /// Clear the failure count after a successful cycle.
    pub fn reset(&mut self) {
        self.failures = 0;
    }

    #[must_use]
    pub const fn failures(&self) -> u32 {
        self.failures
    }
}

fn jitter(delay: Duration) -> Duration {
    let factor = rand::thread_rng().gen_range(-JITTER_FRACTION..=JITTER_FRACTION);
    delay.mul_f64(1.0 + factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backoff() -> Backoff {
        Backoff::new(Duration::from_secs(30), Duration::from_secs(600))
    }

    #[test]
    fn doubles_until_cap() {
        let mut backoff = backoff();
        let mut bases = Vec::new();
        for _ in 0..7 {
            backoff.next_delay();
            bases.push(backoff.base_delay().as_secs());
        }
        assert_eq!(bases, vec![30, 60, 120, 240, 480, 600, 600]);
    }

    #[test]
    fn jitter_stays_within_twenty_percent() {
        let mut backoff = backoff();
        for _ in 0..50 {
            backoff.reset();
            let delay = backoff.next_delay().as_secs_f64();
            assert!((24.0..=36.0).contains(&delay), "{delay}");
        }
    }

    #[test]
    fn reset_restarts_from_base() {
        let mut backoff = backoff();
        backoff.next_delay();
        backoff.next_delay();
        assert_eq!(backoff.failures(), 2);
        backoff.reset();
        assert_eq!(backoff.failures(), 0);
        backoff.next_delay();
        assert_eq!(backoff.base_delay(), Duration::from_secs(30));
    }

    #[test]
    fn many_failures_do_not_overflow() {
        let mut backoff = backoff();
        for _ in 0..100 {
            backoff.next_delay();
        }
        assert_eq!(backoff.base_delay(), Duration::from_secs(600));
    }
}
