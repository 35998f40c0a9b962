//! Market data port.

use async_trait::async_trait;

use crate::domain::{MarketId, RawQuote, VenueId};
use crate::error::Result;

/// Read-only source of raw venue payloads.
///
/// Implementations own their retry policy; the engine never retries.
/// No order-placement counterpart exists.
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    /// Fetch the current top-of-book payload for one market.
    async fn fetch_quote(&self, venue: &VenueId, market_id: &MarketId) -> Result<RawQuote>;

    /// Name for logging.
    fn name(&self) -> &'static str;
}
