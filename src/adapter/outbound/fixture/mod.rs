//! Offline quote sources.
//!
//! The generic schema is a flat list of outcomes with their top of book.
//! The stub fetcher serves fixed generic payloads so a full cycle can run
//! without network access.

pub mod normalizer;
pub mod stub;

pub use normalizer::GenericNormalizer;
pub use stub::StubFetcher;
