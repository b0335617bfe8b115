//! Registry provider abstraction.
//!
//! A provider understands one way of hosting a registry (a git host, a plain
//! web server, a local directory). It canonicalizes registry URLs, splits
//! fully-qualified specifiers, and reads files out of the registry.
//!
//! Providers are kept in a [`ProviderRegistry`] and selected by first match.

use std::fmt;
use std::sync::Arc;

use crate::error::{BlocksmithError, Result};

use super::fetch::HttpFetcher;
use super::github::GitHubProvider;
use super::gitlab::GitLabProvider;
use super::http::HttpProvider;
use super::local::LocalProvider;

/// A specifier split into its registry and its `category/name` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSpecifier {
    /// Canonical registry URL.
    pub registry_url: String,
    /// `category/name`, empty when only a registry URL was parsed.
    pub specifier: String,
}

impl ParsedSpecifier {
    /// The canonical `<registry>/<category>/<name>` form.
    pub fn qualified(&self) -> String {
        format!("{}/{}", self.registry_url, self.specifier)
    }
}

/// One way of hosting a registry.
pub trait RegistryProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Does this provider understand `url`?
    fn matches(&self, url: &str) -> bool;

    /// Split `specifier` into registry URL and block specifier.
    ///
    /// With `fully_qualified` the input must end in `category/name`;
    /// otherwise the whole input is a registry URL.
    fn parse(&self, specifier: &str, fully_qualified: bool) -> Result<ParsedSpecifier>;

    /// Where `path` (relative to the registry root) can be read from.
    fn resolve_url(&self, registry_url: &str, path: &str) -> Result<String>;

    /// Read `path` from the registry.
    fn fetch_raw(&self, registry_url: &str, path: &str) -> Result<String>;
}

/// Split trailing `category/name` segments off a URL-like specifier.
pub(crate) fn split_specifier(
    input: &str,
    fully_qualified: bool,
) -> Result<ParsedSpecifier> {
    let trimmed = input.trim_end_matches('/');
    if !fully_qualified {
        return Ok(ParsedSpecifier {
            registry_url: trimmed.to_string(),
            specifier: String::new(),
        });
    }

    let mut parts = trimmed.rsplitn(3, '/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(category), Some(registry))
            if !name.is_empty() && !category.is_empty() && !registry.is_empty() =>
        {
            Ok(ParsedSpecifier {
                registry_url: registry.to_string(),
                specifier: format!("{}/{}", category, name),
            })
        }
        _ => Err(invalid(input, "expected <registry>/<category>/<name>")),
    }
}

pub(crate) fn invalid(specifier: &str, message: impl Into<String>) -> BlocksmithError {
    BlocksmithError::InvalidSpecifier {
        specifier: specifier.to_string(),
        message: message.into(),
    }
}

/// A configured registry bound to the provider that understands it.
#[derive(Clone)]
pub struct RegistryProviderState {
    /// Canonical registry URL.
    pub url: String,
    /// Provider for `url`.
    pub provider: Arc<dyn RegistryProvider>,
}

impl RegistryProviderState {
    /// Parse `category/name` relative to this registry.
    pub fn parse(&self, specifier: &str) -> Result<ParsedSpecifier> {
        self.provider
            .parse(&format!("{}/{}", self.url, specifier), true)
    }

    /// Read `path` from this registry.
    pub fn fetch_raw(&self, path: &str) -> Result<String> {
        self.provider.fetch_raw(&self.url, path)
    }

    /// Where `path` in this registry is read from.
    pub fn resolve_url(&self, path: &str) -> Result<String> {
        self.provider.resolve_url(&self.url, path)
    }
}

impl fmt::Debug for RegistryProviderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryProviderState")
            .field("url", &self.url)
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Ordered collection of providers.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn RegistryProvider>>,
}

impl ProviderRegistry {
    /// Create a registry with no providers.
    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Append a provider; earlier providers win.
    pub fn register(mut self, provider: impl RegistryProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// The first provider matching `url`.
    pub fn select(&self, url: &str) -> Option<Arc<dyn RegistryProvider>> {
        self.providers.iter().find(|p| p.matches(url)).cloned()
    }

    /// The provider for a fully-qualified block specifier.
    ///
    /// A bare `category/name` never selects a provider, even when its
    /// category looks like a provider prefix (`fs/button`).
    pub fn select_qualified(&self, specifier: &str) -> Option<Arc<dyn RegistryProvider>> {
        if specifier.trim_end_matches('/').split('/').count() <= 2 {
            return None;
        }
        self.select(specifier)
    }

    /// Bind a registry URL to its provider, canonicalizing the URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpecifier` if no provider understands `url`.
    pub fn state(&self, url: &str) -> Result<RegistryProviderState> {
        let provider = self
            .select(url)
            .ok_or_else(|| invalid(url, "no provider understands this registry"))?;
        let parsed = provider.parse(url, false)?;
        Ok(RegistryProviderState {
            url: parsed.registry_url,
            provider,
        })
    }

    /// Bind every URL, preserving order.
    pub fn states(&self, urls: &[String]) -> Result<Vec<RegistryProviderState>> {
        urls.iter().map(|url| self.state(url)).collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        let fetcher = Arc::new(HttpFetcher::new());
        Self::empty()
            .register(GitHubProvider::new(fetcher.clone()))
            .register(GitLabProvider::new(fetcher.clone()))
            .register(HttpProvider::new(fetcher))
            .register(LocalProvider)
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("ProviderRegistry")
            .field("providers", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_fully_qualified() {
        let parsed = split_specifier("https://example.com/r/ui/button", true).unwrap();
        assert_eq!(parsed.registry_url, "https://example.com/r");
        assert_eq!(parsed.specifier, "ui/button");
        assert_eq!(parsed.qualified(), "https://example.com/r/ui/button");
    }

    #[test]
    fn split_registry_only_trims_slash() {
        let parsed = split_specifier("https://example.com/r/", false).unwrap();
        assert_eq!(parsed.registry_url, "https://example.com/r");
        assert!(parsed.specifier.is_empty());
    }

    #[test]
    fn split_rejects_short_specifier() {
        assert!(matches!(
            split_specifier("button", true),
            Err(BlocksmithError::InvalidSpecifier { .. })
        ));
    }

    #[test]
    fn default_selection_order() {
        let providers = ProviderRegistry::default();
        let name = |url: &str| providers.select(url).map(|p| p.name());

        assert_eq!(name("github/acme/lib"), Some("github"));
        assert_eq!(name("https://github.com/acme/lib"), Some("github"));
        assert_eq!(name("gitlab/acme/lib"), Some("gitlab"));
        assert_eq!(name("https://example.com/registry"), Some("http"));
        assert_eq!(name("./registry"), Some("local"));
        assert_eq!(name("ui/button"), None);
    }

    #[test]
    fn bare_specifier_never_selects_a_provider() {
        let providers = ProviderRegistry::default();
        let name = |spec: &str| providers.select_qualified(spec).map(|p| p.name());

        assert_eq!(name("fs/button"), None);
        assert_eq!(name("github/icons"), None);
        assert_eq!(name("fs/registry/ui/button"), Some("local"));
        assert_eq!(name("github/acme/lib/ui/button"), Some("github"));
    }

    #[test]
    fn state_canonicalizes_url() {
        let providers = ProviderRegistry::default();
        let state = providers.state("https://github.com/acme/lib").unwrap();
        assert_eq!(state.url, "github/acme/lib");

        let parsed = state.parse("ui/button").unwrap();
        assert_eq!(parsed.qualified(), "github/acme/lib/ui/button");
    }

    #[test]
    fn state_rejects_unknown_registry() {
        let providers = ProviderRegistry::default();
        assert!(providers.state("ftp://example.com").is_err());
    }
}
