//! Quote normalization port.

use crate::domain::{NormalizationError, NormalizedQuote, RawQuote};

/// Converts one venue's payload schema into a [`NormalizedQuote`].
///
/// One implementation per venue schema. Implementations must be pure:
/// the same raw quote always yields the same result.
pub trait QuoteNormalizer: Send + Sync {
    /// Schema name for logging.
    fn schema(&self) -> &'static str;

    /// Normalize a raw payload.
    fn normalize(&self, raw: &RawQuote) -> Result<NormalizedQuote, NormalizationError>;
}
