//! HTTP file fetching.
//!
//! Provides a blocking HTTP client shared by every web-hosted provider.

use anyhow::{bail, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Fetches registry files over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

/// Response from fetching a file.
#[derive(Debug)]
pub struct FetchResponse {
    /// The file content.
    pub content: String,
    /// ETag header if present.
    pub etag: Option<String>,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with default 30-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP fetcher with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(concat!("blocksmith/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self { client, timeout }
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch a file from a URL.
    pub fn fetch(&self, url: &str) -> Result<FetchResponse> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        let etag = response
            .headers()
            .get("etag")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let content = response.text()?;

        Ok(FetchResponse { content, etag })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn default_timeout_is_30_seconds() {
        let fetcher = HttpFetcher::new();
        assert_eq!(fetcher.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn custom_timeout() {
        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(60));
        assert_eq!(fetcher.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn fetches_content_and_etag() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/registry/file.ts");
            then.status(200)
                .header("etag", "\"abc123\"")
                .body("export {};");
        });

        let response = HttpFetcher::new()
            .fetch(&server.url("/registry/file.ts"))
            .unwrap();
        mock.assert();
        assert_eq!(response.content, "export {};");
        assert_eq!(response.etag.as_deref(), Some("\"abc123\""));
    }

    #[test]
    fn non_success_status_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let result = HttpFetcher::new().fetch(&server.url("/missing"));
        assert!(result.unwrap_err().to_string().contains("404"));
    }
}
