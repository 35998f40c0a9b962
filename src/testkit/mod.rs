//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`fetcher`] - `ScriptedFetcher`, an in-memory [`QuoteFetcher`](crate::port::QuoteFetcher)
//!   with canned payloads, delays and failures.
//! - [`domain`] - Builders for quotes, payloads and mappings.

pub mod domain;
pub mod fetcher;
