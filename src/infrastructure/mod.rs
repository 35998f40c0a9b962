//! Infrastructure layer.
//!
//! Runtime wiring and scheduling without business logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`backoff`] - Exponential backoff with jitter
//! - [`daemon`] - Single-shot and repeating scan loop

pub mod backoff;
pub mod bootstrap;
pub mod daemon;

pub use bootstrap::{build, Components, DataSource};
pub use daemon::ScanDaemon;
