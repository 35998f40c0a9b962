//! Shared read-only HTTP plumbing for venue clients.
//!
//! Every venue call is a GET returning JSON. Transient failures (timeouts,
//! connection errors, HTTP 429 and 5xx) are retried with a linear backoff;
//! anything else surfaces immediately. An optional shared semaphore caps
//! requests in flight across every client holding it.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::error::Result;

const USER_AGENT: &str = concat!("arbscan/", env!("CARGO_PKG_VERSION"), " (read-only)");

/// GET-only JSON client with retry.
#[derive(Clone)]
pub struct JsonHttp {
    http: HttpClient,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
    limiter: Option<Arc<Semaphore>>,
}

impl JsonHttp {
    #[must_use]
    pub fn from_config(config: &HttpConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
            limiter: None,
        }
    }

    /// Hold a permit from `limiter` for each request attempt.
    #[must_use]
    pub fn with_limiter(mut self, limiter: Arc<Semaphore>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// GET `url` with query parameters and decode the JSON body.
    pub async fn get<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            debug!(url, attempt, "GET");
            let result = {
                let _permit = match &self.limiter {
                    Some(limiter) => limiter.acquire().await.ok(),
                    None => None,
                };
                self.get_once::<T>(url, query).await
            };

            match result {
                Ok(parsed) => return Ok(parsed),
                Err(err) if attempt < max_attempts && is_retryable(&err) => {
                    self.backoff(attempt, max_attempts, &err).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn get_once<T>(&self, url: &str, query: &[(&str, &str)]) -> reqwest::Result<T>
    where
        T: DeserializeOwned,
    {
        self.http
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms * u64::from(attempt))).await;
        }
    }
}

fn is_retryable(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.status().is_some_and(retryable_status)
}

fn retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const SLOW_OK: &[u8] = b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
content-length: 2\r\nconnection: close\r\n\r\n{}";

    /// Local server that answers every request after a delay and records
    /// the highest number of requests it held at once.
    async fn slow_server() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/book", listener.local_addr().unwrap());
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&peak);

        tokio::spawn(async move {
            loop {
                let (mut socket, _) = listener.accept().await.unwrap();
                let active = Arc::clone(&active);
                let peak = Arc::clone(&peak);
                tokio::spawn(async move {
                    let mut buf = [0u8; 2048];
                    let _ = socket.read(&mut buf).await;
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    sleep(Duration::from_millis(50)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    let _ = socket.write_all(SLOW_OK).await;
                });
            }
        });

        (url, observed)
    }

    #[tokio::test]
    async fn shared_limiter_caps_requests_in_flight() {
        let (url, peak) = slow_server().await;
        let limiter = Arc::new(Semaphore::new(2));
        let kalshi = JsonHttp::from_config(&HttpConfig::default()).with_limiter(Arc::clone(&limiter));
        let polymarket = JsonHttp::from_config(&HttpConfig::default()).with_limiter(limiter);

        let requests = (0..6).map(|i| {
            let http = if i % 2 == 0 { &kalshi } else { &polymarket };
            http.get::<serde_json::Value>(&url, &[])
        });
        let results = futures_util::future::join_all(requests).await;

        assert!(results.iter().all(|r| r.is_ok()));
        let peak = peak.load(Ordering::SeqCst);
        assert!((1..=2).contains(&peak), "peak {peak}");
    }

    #[tokio::test]
    async fn not_found_is_not_retried() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/missing", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        tokio::spawn(async move {
            loop {
                let (mut socket, _) = listener.accept().await.unwrap();
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                    .await;
            }
        });

        let http = JsonHttp::from_config(&HttpConfig::default());
        assert!(http.get::<serde_json::Value>(&url, &[]).await.is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rate_limit_and_server_errors_retry() {
        assert!(retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(retryable_status(StatusCode::BAD_GATEWAY));
        assert!(!retryable_status(StatusCode::NOT_FOUND));
        assert!(!retryable_status(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn user_agent_marks_read_only() {
        assert!(USER_AGENT.starts_with("arbscan/"));
        assert!(USER_AGENT.ends_with("(read-only)"));
    }
}
