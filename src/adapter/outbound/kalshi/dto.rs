//! Kalshi API response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `GET /markets/{ticker}/orderbook`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderbookResponse {
    #[serde(default)]
    pub orderbook: Orderbook,
}

/// Bid ladders per side. Levels are `[price, quantity]`.
///
/// `yes` / `no` carry prices in cents; the `_dollars` variants carry
/// decimal strings in dollars and win when present. A null ladder means
/// no resting bids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Orderbook {
    #[serde(default)]
    pub yes: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    pub no: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    pub yes_dollars: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    pub no_dollars: Option<Vec<Vec<Value>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orderbook_deserializes_from_api_response() {
        let json = r#"{
            "orderbook": {
                "yes": [[1, 200], [45, 100]],
                "no": [[53, 50]],
                "yes_dollars": [["0.0100", 200], ["0.4500", 100]],
                "no_dollars": [["0.5300", 50]]
            }
        }"#;

        let response: OrderbookResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.orderbook.yes.as_ref().map(Vec::len), Some(2));
        assert_eq!(response.orderbook.no_dollars.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn null_ladders_deserialize_as_none() {
        let json = r#"{"orderbook": {"yes": null, "no": null}}"#;
        let response: OrderbookResponse = serde_json::from_str(json).unwrap();
        assert!(response.orderbook.yes.is_none());
        assert!(response.orderbook.no.is_none());
        assert!(response.orderbook.yes_dollars.is_none());
    }
}
