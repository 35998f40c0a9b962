//! Scan policy from process environment.
//!
//! The policy is read once at startup and threaded into every cycle as an
//! immutable value. The detection engine never touches the environment.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{ScanMode, Volume};
use crate::error::{ConfigError, Result, SafetyError};

pub const ENV_DRY_RUN: &str = "DRY_RUN";
pub const ENV_MODE: &str = "MODE";
pub const ENV_ALERT_ONLY: &str = "ALERT_ONLY";
pub const ENV_ALERT_THRESHOLD: &str = "ALERT_THRESHOLD";
pub const ENV_FEE_BUFFER_BPS: &str = "FEE_BUFFER_BPS";
pub const ENV_MIN_EXEC_SIZE: &str = "MIN_EXEC_SIZE";
pub const ENV_NEAR_MISS_FLOOR: &str = "NEAR_MISS_FLOOR";

const DEFAULT_ALERT_THRESHOLD: Decimal = dec!(0.02);
const DEFAULT_FEE_BUFFER_BPS: u32 = 25;

/// Per-cycle decision knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPolicy {
    pub mode: ScanMode,
    /// Emit only candidates that pass the alert rule.
    pub alert_only: bool,
    /// Minimum net edge for an alert.
    pub alert_threshold: Decimal,
    /// Fee and slippage buffer in basis points of hedge cost.
    pub buffer_bps: u32,
    /// Minimum top-of-book liquidity for an alert.
    pub min_exec_size: Volume,
    near_miss_floor: Option<Decimal>,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            mode: ScanMode::default(),
            alert_only: false,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            buffer_bps: DEFAULT_FEE_BUFFER_BPS,
            min_exec_size: Volume::ZERO,
            near_miss_floor: None,
        }
    }
}

impl ScanPolicy {
    /// Read the policy from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SafetyError::DryRunDisabled`] when `DRY_RUN` is set to
    /// anything but an enabled flag, and [`ConfigError::InvalidValue`] for
    /// unparseable values.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the policy from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        check_dry_run(lookup(ENV_DRY_RUN))?;

        let mut policy = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = value(ENV_MODE) {
            policy.mode = raw.parse().map_err(|reason| ConfigError::InvalidValue {
                field: ENV_MODE,
                reason,
            })?;
        }
        if let Some(raw) = value(ENV_ALERT_ONLY) {
            policy.alert_only = parse_flag(ENV_ALERT_ONLY, &raw)?;
        }
        if let Some(raw) = value(ENV_ALERT_THRESHOLD) {
            policy.alert_threshold = parse_decimal(ENV_ALERT_THRESHOLD, &raw)?;
        }
        if let Some(raw) = value(ENV_FEE_BUFFER_BPS) {
            policy.buffer_bps =
                raw.trim()
                    .parse::<u32>()
                    .map_err(|e| ConfigError::InvalidValue {
                        field: ENV_FEE_BUFFER_BPS,
                        reason: format!("expected a non-negative integer: {e}"),
                    })?;
        }
        if let Some(raw) = value(ENV_MIN_EXEC_SIZE) {
            let size = parse_decimal(ENV_MIN_EXEC_SIZE, &raw)?;
            if size < Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: ENV_MIN_EXEC_SIZE,
                    reason: "must be 0 or greater".to_string(),
                }
                .into());
            }
            policy.min_exec_size = size;
        }
        if let Some(raw) = value(ENV_NEAR_MISS_FLOOR) {
            policy.near_miss_floor = Some(parse_decimal(ENV_NEAR_MISS_FLOOR, &raw)?);
        }

        Ok(policy)
    }

    /// Replace the mode, keeping every other knob.
    #[must_use]
    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_alert_only(mut self, alert_only: bool) -> Self {
        self.alert_only = alert_only;
        self
    }

    #[must_use]
    pub fn with_alert_threshold(mut self, threshold: Decimal) -> Self {
        self.alert_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_buffer_bps(mut self, bps: u32) -> Self {
        self.buffer_bps = bps;
        self
    }

    #[must_use]
    pub fn with_near_miss_floor(mut self, floor: Decimal) -> Self {
        self.near_miss_floor = Some(floor);
        self
    }

    /// Lower bound of the near-miss band.
    ///
    /// An explicit floor wins; otherwise SAFE uses -0.005 and LAB -0.01.
    #[must_use]
    pub fn near_miss_floor(&self) -> Decimal {
        self.near_miss_floor.unwrap_or(match self.mode {
            ScanMode::Safe => dec!(-0.005),
            ScanMode::Lab => dec!(-0.01),
        })
    }
}

fn check_dry_run(raw: Option<String>) -> Result<()> {
    let Some(raw) = raw else {
        return Ok(());
    };
    match parse_flag(ENV_DRY_RUN, &raw) {
        Ok(true) => Ok(()),
        _ => Err(SafetyError::DryRunDisabled { value: raw }.into()),
    }
}

fn parse_flag(field: &'static str, raw: &str) -> std::result::Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field,
            reason: format!("'{other}' is not a boolean flag"),
        }),
    }
}

fn parse_decimal(field: &'static str, raw: &str) -> std::result::Result<Decimal, ConfigError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    fn policy(vars: &[(&str, &str)]) -> Result<ScanPolicy> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ScanPolicy::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let policy = policy(&[]).unwrap();
        assert_eq!(policy.mode, ScanMode::Lab);
        assert!(!policy.alert_only);
        assert_eq!(policy.alert_threshold, dec!(0.02));
        assert_eq!(policy.buffer_bps, 25);
        assert_eq!(policy.min_exec_size, dec!(0));
        assert_eq!(policy.near_miss_floor(), dec!(-0.01));
    }

    #[test]
    fn dry_run_accepts_enabled_flags() {
        for value in ["1", "true", "YES", " on "] {
            assert!(policy(&[(ENV_DRY_RUN, value)]).is_ok(), "{value}");
        }
    }

    #[test]
    fn dry_run_rejects_everything_else() {
        for value in ["0", "false", "off", "maybe", ""] {
            let err = policy(&[(ENV_DRY_RUN, value)]).unwrap_err();
            assert!(
                matches!(err, Error::Safety(SafetyError::DryRunDisabled { .. })),
                "{value}"
            );
        }
    }

    #[test]
    fn parses_all_knobs() {
        let policy = policy(&[
            (ENV_MODE, "safe"),
            (ENV_ALERT_ONLY, "1"),
            (ENV_ALERT_THRESHOLD, "0.06"),
            (ENV_FEE_BUFFER_BPS, "40"),
            (ENV_MIN_EXEC_SIZE, "10"),
            (ENV_NEAR_MISS_FLOOR, "-0.02"),
        ])
        .unwrap();
        assert_eq!(policy.mode, ScanMode::Safe);
        assert!(policy.alert_only);
        assert_eq!(policy.alert_threshold, dec!(0.06));
        assert_eq!(policy.buffer_bps, 40);
        assert_eq!(policy.min_exec_size, dec!(10));
        assert_eq!(policy.near_miss_floor(), dec!(-0.02));
    }

    #[test]
    fn safe_mode_uses_tighter_near_miss_floor() {
        let policy = policy(&[(ENV_MODE, "SAFE")]).unwrap();
        assert_eq!(policy.near_miss_floor(), dec!(-0.005));
        assert_eq!(
            policy.with_mode(ScanMode::Lab).near_miss_floor(),
            dec!(-0.01)
        );
    }

    #[test]
    fn unknown_flag_text_is_invalid() {
        let err = policy(&[(ENV_ALERT_ONLY, "sometimes")]).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: ENV_ALERT_ONLY,
                ..
            })
        ));
    }

    #[test]
    fn negative_buffer_is_invalid() {
        assert!(policy(&[(ENV_FEE_BUFFER_BPS, "-5")]).is_err());
    }

    #[test]
    fn unknown_mode_is_invalid() {
        assert!(policy(&[(ENV_MODE, "paper")]).is_err());
    }
}
