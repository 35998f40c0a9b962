//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the detection engine and the outside world.
//! Adapters implement them for real venues, files and fixtures.
//!
//! # Available Ports
//!
//! - [`QuoteFetcher`] - Raw top-of-book payloads from a venue
//! - [`QuoteNormalizer`] - Venue payload to [`crate::domain::NormalizedQuote`]
//! - [`MappingSource`] - Curated cross-venue market mappings

mod fetcher;
mod mapping;
mod normalizer;

pub use fetcher::QuoteFetcher;
pub use mapping::MappingSource;
pub use normalizer::QuoteNormalizer;
