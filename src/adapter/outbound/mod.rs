//! Outbound adapters (driven side).

pub mod fixture;
pub mod http;
pub mod kalshi;
pub mod mapping_file;
pub mod polymarket;
pub mod report;
pub mod router;
