//! Venue dispatch for quote fetching.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{MarketId, RawQuote, VenueId};
use crate::error::{Error, Result};
use crate::port::QuoteFetcher;

/// Routes each fetch to the client registered for its venue.
#[derive(Default, Clone)]
pub struct VenueRouter {
    fetchers: HashMap<VenueId, Arc<dyn QuoteFetcher>>,
}

impl VenueRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, venue: impl Into<VenueId>, fetcher: Arc<dyn QuoteFetcher>) -> Self {
        self.fetchers.insert(venue.into(), fetcher);
        self
    }

    /// Venues with a registered fetcher, sorted.
    #[must_use]
    pub fn venues(&self) -> Vec<&VenueId> {
        let mut venues: Vec<_> = self.fetchers.keys().collect();
        venues.sort();
        venues
    }
}

#[async_trait]
impl QuoteFetcher for VenueRouter {
    async fn fetch_quote(&self, venue: &VenueId, market_id: &MarketId) -> Result<RawQuote> {
        let fetcher = self
            .fetchers
            .get(venue)
            .ok_or_else(|| Error::UnknownVenue(venue.clone()))?;
        fetcher.fetch_quote(venue, market_id).await
    }

    fn name(&self) -> &'static str {
        "VenueRouter"
    }
}
