//! Byte fetching for pages and images.
//!
//! The scan pipeline retrieves remote resources through the [`ByteFetcher`]
//! trait so that tests can substitute scripted fetchers. The production
//! implementation is [`HttpFetcher`], a thin wrapper over a shared
//! `reqwest::Client`.

use std::future::Future;
use std::sync::Arc;

use crate::config::constants::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::FetchError;

/// Retrieves the raw bytes behind a URL.
pub trait ByteFetcher: Send + Sync {
    /// Fetches the resource at `url` and returns its body bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport failure, non-success status, or
    /// oversized body.
    fn fetch_bytes(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// HTTP fetcher backed by a shared `reqwest::Client`.
///
/// The client carries the configured User-Agent, timeout, and redirect
/// policy; see `initialization::init_client`.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
}

impl HttpFetcher {
    /// Creates a fetcher over an already-initialized client.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        HttpFetcher { client }
    }
}

impl ByteFetcher for HttpFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        if body.len() > MAX_RESPONSE_BODY_SIZE {
            return Err(FetchError::BodyTooLarge {
                size: body.len(),
                limit: MAX_RESPONSE_BODY_SIZE,
            });
        }
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Arc::new(reqwest::Client::new()))
    }

    #[tokio::test]
    async fn test_fetch_bytes_returns_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/page"))
                .respond_with(status_code(200).body("<html>hello</html>")),
        );

        let url = server.url_str("/page");
        let bytes = fetcher().fetch_bytes(&url).await.expect("fetch succeeds");
        assert_eq!(bytes, b"<html>hello</html>");
    }

    #[tokio::test]
    async fn test_fetch_bytes_rejects_error_status() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/missing"))
                .respond_with(status_code(404)),
        );

        let url = server.url_str("/missing");
        let result = fetcher().fetch_bytes(&url).await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }

    #[tokio::test]
    async fn test_fetch_bytes_rejects_unroutable_url() {
        // Reserved TLD guarantees resolution failure without network access.
        let result = fetcher().fetch_bytes("http://unreachable.invalid/").await;
        assert!(result.is_err());
    }
}
