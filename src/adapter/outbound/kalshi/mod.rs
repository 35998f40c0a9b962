//! Kalshi market data (read-only).
//!
//! Kalshi's public order book lists resting bids only, one ladder per side.
//! An ask on one side is implied by the best bid on the other: buying YES at
//! `p` matches someone bidding `1 - p` for NO.

pub mod client;
pub mod dto;
pub mod normalizer;

pub use client::KalshiClient;
pub use normalizer::KalshiNormalizer;
