use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::config::{Config, ScanPolicy};
use crate::error::Result;

/// Validate the configuration file and the scan environment without
/// contacting any venue.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let file_present = path.exists();
    let config = Config::load_or_default(path)?;
    let policy = ScanPolicy::from_env()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "config": path.display().to_string(),
            "config_present": file_present,
            "mode": policy.mode,
            "alert_only": policy.alert_only,
            "alert_threshold": policy.alert_threshold,
            "buffer_bps": policy.buffer_bps,
            "min_exec_size": policy.min_exec_size,
            "near_miss_floor": policy.near_miss_floor(),
            "mappings": config.mappings.path.display().to_string(),
            "mappings_present": config.mappings.path.exists(),
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    if file_present {
        output::success("Configuration file is valid");
    } else {
        output::warning("Configuration file not found, using defaults");
    }
    output::success("DRY_RUN enabled (read-only)");

    output::section("Scan");
    output::field("Mode", policy.mode);
    output::field("Alert only", policy.alert_only);
    output::field("Threshold", policy.alert_threshold);
    output::field("Buffer (bps)", policy.buffer_bps);
    output::field("Min size", policy.min_exec_size);
    output::field("Near miss", policy.near_miss_floor());
    output::field("Concurrency", config.scan.max_concurrency);
    output::field("Timeout (ms)", config.scan.cycle_timeout_ms);

    output::section("Venues");
    output::field("Kalshi", &config.kalshi.api_url);
    output::field("Polymarket", &config.polymarket.api_url);
    output::field("Gamma", &config.polymarket.gamma_api_url);

    output::section("Mappings");
    output::field("Path", config.mappings.path.display());
    if config.mappings.path.exists() {
        output::success("Mapping file found");
    } else {
        output::warning("Mapping file not found, scans will cover no pairs");
    }

    output::success("Configuration check complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn invalid_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\nmax_concurrency = 0").unwrap();
        let err = execute_config(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scan").unwrap();
        assert!(execute_config(file.path()).is_err());
    }
}
