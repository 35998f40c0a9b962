//! Polymarket market data (read-only).

pub mod client;
pub mod dto;
pub mod normalizer;

pub use client::PolymarketClient;
pub use normalizer::PolymarketNormalizer;
