//! GitLab-hosted registries.

use std::sync::Arc;

use crate::error::{BlocksmithError, Result};

use super::fetch::HttpFetcher;
use super::git_host::HostSyntax;
use super::provider::{ParsedSpecifier, RegistryProvider};

const SYNTAX: HostSyntax = HostSyntax {
    prefix: "gitlab/",
    web_prefix: "https://gitlab.com/",
    tree_marker: &["-", "tree"],
};

const WEB_BASE: &str = "https://gitlab.com";

/// Reads registries from `gitlab/<owner>/<repo>[/-/tree/<ref>]`.
#[derive(Debug)]
pub struct GitLabProvider {
    fetcher: Arc<HttpFetcher>,
    web_base: String,
}

impl GitLabProvider {
    /// Create a provider reading from gitlab.com.
    pub fn new(fetcher: Arc<HttpFetcher>) -> Self {
        Self::with_web_base(fetcher, WEB_BASE)
    }

    /// Create a provider reading from a self-hosted instance.
    pub fn with_web_base(fetcher: Arc<HttpFetcher>, web_base: impl Into<String>) -> Self {
        Self {
            fetcher,
            web_base: web_base.into().trim_end_matches('/').to_string(),
        }
    }
}

impl RegistryProvider for GitLabProvider {
    fn name(&self) -> &'static str {
        "gitlab"
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
            "{}/{}/{}/-/raw/{}/{}",
            self.web_base,
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
