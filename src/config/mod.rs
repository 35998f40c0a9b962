//! Application configuration loading and validation.
//!
//! [`Config`] holds the file-based settings (`config.toml`): logging, scan
//! cycle limits, venue endpoints and the mapping file location. The
//! per-cycle decision knobs come from the environment via [`ScanPolicy`].
//!
//! # Example
//!
//! ```no_run
//! use arbscan::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_or_default("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

mod logging;
mod policy;
mod scan;
mod venue;

pub use logging::LoggingConfig;
pub use policy::{
    ScanPolicy, ENV_ALERT_ONLY, ENV_ALERT_THRESHOLD, ENV_DRY_RUN, ENV_FEE_BUFFER_BPS, ENV_MIN_EXEC_SIZE,
    ENV_MODE, ENV_NEAR_MISS_FLOOR,
};
pub use scan::ScanConfig;
pub use venue::{HttpConfig, KalshiConfig, PolymarketConfig};

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Mapping table location.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingsConfig {
    #[serde(default = "default_mappings_path")]
    pub path: PathBuf,
}

fn default_mappings_path() -> PathBuf {
    PathBuf::from(".data/mappings.json")
}

impl Default for MappingsConfig {
    fn default() -> Self {
        Self {
            path: default_mappings_path(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Cycle concurrency, deadline and cadence.
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub kalshi: KalshiConfig,

    #[serde(default)]
    pub polymarket: PolymarketConfig,

    /// Where SAFE and LAB mappings are read from.
    #[serde(default)]
    pub mappings: MappingsConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    fn validate(&self) -> Result<()> {
        if self.kalshi.api_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "kalshi.api_url",
            }
            .into());
        }
        if self.polymarket.api_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "polymarket.api_url",
            }
            .into());
        }
        if self.polymarket.gamma_api_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "polymarket.gamma_api_url",
            }
            .into());
        }
        if self.scan.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrency",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.scan.cycle_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cycle_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.scan.backoff_max_secs < self.scan.backoff_base_secs {
            return Err(ConfigError::InvalidValue {
                field: "backoff_max_secs",
                reason: "must be >= backoff_base_secs".to_string(),
            }
            .into());
        }
        if self.kalshi.depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "kalshi.depth",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
