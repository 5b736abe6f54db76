//! HTTP implementation of the single-resource fetcher.

use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::domain::errors::FetchError;
use crate::domain::ports::FetcherPort;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fetches photo bytes over HTTP with a per-request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the given request timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::transport(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Creates a fetcher with the default timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_default_timeout() -> Result<Self, FetchError> {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

#[async_trait::async_trait]
impl FetcherPort for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        trace!(url = %parsed, "Fetching resource");
        let response = self.client.get(parsed).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::transport(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::transport(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::transport(format!("Failed to read body: {e}"))
            }
        })?;

        if bytes.is_empty() {
            return Err(FetchError::EmptyBody);
        }

        debug!(url = %url, size = bytes.len(), "Fetched resource");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_returns_body_bytes() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/photos/1.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg bytes".to_vec()))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::with_default_timeout().unwrap();
        let bytes = fetcher
            .fetch(&format!("{}/photos/1.jpg", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(bytes, Bytes::from_static(b"jpeg bytes"));
    }

    #[tokio::test]
    async fn test_fetch_maps_http_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/photos/missing.jpg"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::with_default_timeout().unwrap();
        let err = fetcher
            .fetch(&format!("{}/photos/missing.jpg", mock_server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport { .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_fetch_rejects_empty_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/photos/empty.jpg"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::with_default_timeout().unwrap();
        let err = fetcher
            .fetch(&format!("{}/photos/empty.jpg", mock_server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::EmptyBody));
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        let fetcher = HttpFetcher::with_default_timeout().unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();

        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/photos/slow.jpg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"late".to_vec())
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new(Duration::from_millis(20)).unwrap();
        let err = fetcher
            .fetch(&format!("{}/photos/slow.jpg", mock_server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Timeout));
    }
}
