//! GitHub-hosted registries.

use std::sync::Arc;

use crate::error::{BlocksmithError, Result};

use super::fetch::HttpFetcher;
use super::git_host::HostSyntax;
use super::provider::{ParsedSpecifier, RegistryProvider};

const SYNTAX: HostSyntax = HostSyntax {
    prefix: "github/",
    web_prefix: "https://github.com/",
    tree_marker: &["tree"],
};

const RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Reads registries from `github/<owner>/<repo>[/tree/<ref>]`.
#[derive(Debug)]
pub struct GitHubProvider {
    fetcher: Arc<HttpFetcher>,
    raw_base: String,
}

impl GitHubProvider {
    /// Create a provider reading from raw.githubusercontent.com.
    pub fn new(fetcher: Arc<HttpFetcher>) -> Self {
        Self::with_raw_base(fetcher, RAW_BASE)
    }

    /// Create a provider reading raw files from another base URL.
    pub fn with_raw_base(fetcher: Arc<HttpFetcher>, raw_base: impl Into<String>) -> Self {
        Self {
            fetcher,
            raw_base: raw_base.into().trim_end_matches('/').to_string(),
        }
    }
}

impl RegistryProvider for GitHubProvider {
    fn name(&self) -> &'static str {
        "github"
    }

    fn matches(&self, url: &str) -> bool {
        SYNTAX.matches(url)
    }

    fn parse(&self, specifier: &str, fully_qualified: bool) -> Result<ParsedSpecifier> {
        SYNTAX.parse(specifier, fully_qualified)
    }

    fn resolve_url(&self, registry_url: &str, path: &str) -> Result<String> {
        let (location, _) = SYNTAX.locate(registry_url)?;
        Ok(format!(
            "{}/{}/{}/{}/{}",
            self.raw_base,
            location.owner,
            location.repo,
            location.git_ref(),
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
