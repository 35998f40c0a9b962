//! Polymarket API response types.
//!
//! Two API surfaces:
//! - **Gamma API** (`gamma-api.polymarket.com`) - market metadata: outcome
//!   names and the CLOB token id of each outcome. Uses [`GammaMarket`].
//! - **CLOB API** (`clob.polymarket.com`) - one order book per outcome
//!   token. Uses [`BookResponse`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Market data from the Gamma API.
///
/// `outcomes` and `clobTokenIds` are usually JSON-encoded strings
/// (e.g. `"[\"Yes\", \"No\"]"`) but plain lists also occur, so both are kept
/// as raw JSON and decoded during normalization.
///
/// Response format: flat JSON array (no wrapper object).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub closed: bool,
    /// Outcome names, list or JSON-encoded list.
    #[serde(default)]
    pub outcomes: Value,
    /// CLOB token ids aligned with `outcomes`, list or JSON-encoded list.
    #[serde(default)]
    pub clob_token_ids: Value,
}

/// One price level of a CLOB book. Prices and sizes arrive as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookLevel {
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub size: Value,
}

/// Response of `GET /book?token_id=...`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookResponse {
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub bids: Vec<BookLevel>,
    #[serde(default)]
    pub asks: Vec<BookLevel>,
}

/// Envelope the client hands to the normalizer: the Gamma market plus one
/// book per outcome token. Books are matched to outcomes by `asset_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotePayload {
    pub market: GammaMarket,
    #[serde(default)]
    pub books: Vec<BookResponse>,
}
