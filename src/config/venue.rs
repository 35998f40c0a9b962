//! Venue connection settings.

use serde::Deserialize;

/// HTTP client settings shared by the venue clients.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts for transient failures.
    #[serde(default = "default_http_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_http_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    5000
}

const fn default_http_connect_timeout_ms() -> u64 {
    2000
}

const fn default_http_retry_max_attempts() -> u32 {
    3
}

const fn default_http_retry_backoff_ms() -> u64 {
    250
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
            retry_max_attempts: default_http_retry_max_attempts(),
            retry_backoff_ms: default_http_retry_backoff_ms(),
        }
    }
}

/// Kalshi trade API settings. Only public market data endpoints are used.
#[derive(Debug, Clone, Deserialize)]
pub struct KalshiConfig {
    #[serde(default = "default_kalshi_api_url")]
    pub api_url: String,
    /// Order book depth requested per market.
    #[serde(default = "default_kalshi_depth")]
    pub depth: u32,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_kalshi_api_url() -> String {
    "https://api.elections.kalshi.com/trade-api/v2".into()
}

const fn default_kalshi_depth() -> u32 {
    1
}

impl Default for KalshiConfig {
    fn default() -> Self {
        Self {
            api_url: default_kalshi_api_url(),
            depth: default_kalshi_depth(),
            http: HttpConfig::default(),
        }
    }
}

/// Polymarket settings. Gamma for market metadata, CLOB for books.
#[derive(Debug, Clone, Deserialize)]
pub struct PolymarketConfig {
    #[serde(default = "default_polymarket_gamma_url")]
    pub gamma_api_url: String,
    #[serde(default = "default_polymarket_clob_url")]
    pub api_url: String,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_polymarket_gamma_url() -> String {
    "https://gamma-api.polymarket.com".into()
}

fn default_polymarket_clob_url() -> String {
    "https://clob.polymarket.com".into()
}

impl Default for PolymarketConfig {
    fn default() -> Self {
        Self {
            gamma_api_url: default_polymarket_gamma_url(),
            api_url: default_polymarket_clob_url(),
            http: HttpConfig::default(),
        }
    }
}
