//! Registries served from a plain web server.

use std::sync::Arc;

use crate::error::{BlocksmithError, Result};

use super::fetch::HttpFetcher;
use super::provider::{split_specifier, ParsedSpecifier, RegistryProvider};

/// Reads registries from any `http://` or `https://` base URL.
///
/// Must be registered after the git host providers, whose web URLs it
/// would otherwise claim.
#[derive(Debug)]
pub struct HttpProvider {
    fetcher: Arc<HttpFetcher>,
}

impl HttpProvider {
    pub fn new(fetcher: Arc<HttpFetcher>) -> Self {
        Self { fetcher }
    }
}

impl RegistryProvider for HttpProvider {
    fn name(&self) -> &'static str {
        "http"
    }

    fn matches(&self, url: &str) -> bool {
        url.starts_with("https://") || url.starts_with("http://")
    }

    fn parse(&self, specifier: &str, fully_qualified: bool) -> Result<ParsedSpecifier> {
        split_specifier(specifier, fully_qualified)
    }

    fn resolve_url(&self, registry_url: &str, path: &str) -> Result<String> {
        Ok(format!(
            "{}/{}",
            registry_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }

    fn fetch_raw(&self, registry_url: &str, path: &str) -> Result<String> {
        let url = self.resolve_url(registry_url, path)?;
        self.fetcher
            .fetch(&url)
            .map(|r| r.content)
            .map_err(|e| BlocksmithError::FetchFailed {
                url,
                message: e.to_string(),
            })
    }
}
