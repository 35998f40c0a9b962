//! arbscan - read-only cross-venue arbitrage scanner.
//!
//! Scans curated pairs of equivalent binary markets on Kalshi and
//! Polymarket, prices the hedge of buying YES on one venue and the
//! complementary leg on the other, and reports the net edge after a fee
//! buffer. It never places orders.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - **`domain`** - Venue-agnostic types: quotes, mappings, candidates
//! - **`port`** - Traits for quote fetching, normalization and mapping storage
//! - **`application`** - The detection engine and the scan cycle
//! - **`adapter`** - Kalshi, Polymarket, fixture and file adapters plus the CLI
//! - **`infrastructure`** - Wiring, backoff and the daemon loop
//!
//! # Modules
//!
//! - [`config`] - TOML settings and the environment scan policy
//! - [`domain`] - Exchange-agnostic types
//! - [`error`] - Error types for the crate
//! - [`port`] - Hexagonal ports
//! - [`application`] - Engine and scanner
//! - [`adapter`] - Inbound and outbound adapters
//! - [`infrastructure`] - Runtime wiring
//!
//! # Example
//!
//! ```no_run
//! use arbscan::config::{Config, ScanPolicy};
//! use arbscan::infrastructure::{build, DataSource, ScanDaemon};
//!
//! # async fn example() -> arbscan::error::Result<()> {
//! let config = Config::default();
//! let policy = ScanPolicy::from_env()?;
//! let daemon = ScanDaemon::new(build(&config, DataSource::Stub), policy, &config.scan);
//! let report = daemon.run_once().await?;
//! println!("{} candidates", report.candidates.len());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
