//! Composition root: wires venue adapters, normalizers and the mapping
//! source into a [`Scanner`].

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::info;

use crate::adapter::outbound::fixture::{GenericNormalizer, StubFetcher};
use crate::adapter::outbound::kalshi::{KalshiClient, KalshiNormalizer};
use crate::adapter::outbound::mapping_file::JsonMappingFile;
use crate::adapter::outbound::polymarket::{PolymarketClient, PolymarketNormalizer};
use crate::adapter::outbound::router::VenueRouter;
use crate::application::{NormalizerRegistry, Scanner};
use crate::config::Config;
use crate::domain::{MappingTable, VenueId};
use crate::error::Result;
use crate::port::{MappingSource, QuoteFetcher};

/// Where quotes and mappings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
    /// Live venue APIs and the configured mapping file.
    #[default]
    Live,
    /// Built-in fixture books and mappings; no network access.
    Stub,
}

/// Fixture mappings served from memory.
struct StubMappings;

impl MappingSource for StubMappings {
    fn load_mappings(&self) -> Result<Option<MappingTable>> {
        Ok(Some(StubFetcher::mappings()))
    }
}

/// Runtime components built from configuration.
pub struct Components {
    pub scanner: Scanner,
    pub mappings: Arc<dyn MappingSource>,
}

/// Build the fetcher for the data source.
#[must_use]
pub fn build_fetcher(config: &Config, source: DataSource) -> Arc<dyn QuoteFetcher> {
    match source {
        DataSource::Live => {
            let requests = Arc::new(Semaphore::new(config.scan.max_concurrency.max(1)));
            let kalshi =
                KalshiClient::from_config(&config.kalshi).with_limiter(Arc::clone(&requests));
            let polymarket =
                PolymarketClient::from_config(&config.polymarket).with_limiter(requests);
            Arc::new(
                VenueRouter::new()
                    .with(VenueId::kalshi(), Arc::new(kalshi))
                    .with(VenueId::polymarket(), Arc::new(polymarket)),
            )
        }
        DataSource::Stub => Arc::new(StubFetcher::new()),
    }
}

/// Build the normalizer registry for the data source.
#[must_use]
pub fn build_normalizers(source: DataSource) -> NormalizerRegistry {
    match source {
        DataSource::Live => NormalizerRegistry::new()
            .with(VenueId::kalshi(), Arc::new(KalshiNormalizer))
            .with(VenueId::polymarket(), Arc::new(PolymarketNormalizer)),
        DataSource::Stub => NormalizerRegistry::new()
            .with(VenueId::kalshi(), Arc::new(GenericNormalizer))
            .with(VenueId::polymarket(), Arc::new(GenericNormalizer)),
    }
}

/// Build the mapping source for the data source.
#[must_use]
pub fn build_mapping_source(config: &Config, source: DataSource) -> Arc<dyn MappingSource> {
    match source {
        DataSource::Live => Arc::new(JsonMappingFile::new(&config.mappings.path)),
        DataSource::Stub => Arc::new(StubMappings),
    }
}

/// Wire every runtime component.
#[must_use]
pub fn build(config: &Config, source: DataSource) -> Components {
    let fetcher = build_fetcher(config, source);
    let normalizers = build_normalizers(source);
    info!(
        source = ?source,
        fetcher = fetcher.name(),
        normalizers = normalizers.len(),
        max_concurrency = config.scan.max_concurrency,
        "Components built"
    );

    Components {
        scanner: Scanner::new(fetcher, normalizers, &config.scan),
        mappings: build_mapping_source(config, source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_registry_covers_both_venues() {
        let registry = build_normalizers(DataSource::Live);
        assert_eq!(registry.schema_for(&VenueId::kalshi()), Some("kalshi"));
        assert_eq!(registry.schema_for(&VenueId::polymarket()), Some("polymarket"));
    }

    #[test]
    fn stub_registry_is_generic() {
        let registry = build_normalizers(DataSource::Stub);
        assert_eq!(registry.schema_for(&VenueId::kalshi()), Some("generic"));
        assert_eq!(registry.schema_for(&VenueId::polymarket()), Some("generic"));
    }

    #[test]
    fn stub_mappings_load_without_files() {
        let source = build_mapping_source(&Config::default(), DataSource::Stub);
        let table = source.load_mappings().unwrap().unwrap();
        assert_eq!(table.safe().len(), 1);
        assert_eq!(table.lab().len(), 2);
    }

    #[test]
    fn fetcher_names() {
        let config = Config::default();
        assert_eq!(build_fetcher(&config, DataSource::Live).name(), "VenueRouter");
        assert_eq!(build_fetcher(&config, DataSource::Stub).name(), "Stub");
    }
}
