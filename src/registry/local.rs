//! Registries stored in a local directory.
//!
//! Useful for developing a registry next to the project consuming it.
//! Registry URLs are filesystem paths, optionally prefixed with `fs/`
//! (`fs/../my-registry`). A bare `fs/<name>` block specifier still refers
//! to the `fs` category; see [`super::ProviderRegistry::select_qualified`].

use std::fs;
use std::path::PathBuf;

use crate::error::{BlocksmithError, Result};

use super::provider::{split_specifier, ParsedSpecifier, RegistryProvider};

const PREFIX: &str = "fs/";

/// Reads registries straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProvider;

impl LocalProvider {
    fn root(registry_url: &str) -> PathBuf {
        PathBuf::from(registry_url.strip_prefix(PREFIX).unwrap_or(registry_url))
    }
}

impl RegistryProvider for LocalProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    fn matches(&self, url: &str) -> bool {
        url.starts_with(PREFIX)
            || url.starts_with('/')
            || url.starts_with("./")
            || url.starts_with("../")
    }

    fn parse(&self, specifier: &str, fully_qualified: bool) -> Result<ParsedSpecifier> {
        split_specifier(specifier, fully_qualified)
    }

    fn resolve_url(&self, registry_url: &str, path: &str) -> Result<String> {
        Ok(Self::root(registry_url)
            .join(path.trim_start_matches('/'))
            .display()
            .to_string())
    }

    fn fetch_raw(&self, registry_url: &str, path: &str) -> Result<String> {
        let url = self.resolve_url(registry_url, path)?;
        fs::read_to_string(&url).map_err(|e| BlocksmithError::FetchFailed {
            url,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn matches_path_forms() {
        assert!(LocalProvider.matches("fs/registry"));
        assert!(LocalProvider.matches("./registry"));
        assert!(LocalProvider.matches("../registry"));
        assert!(LocalProvider.matches("/srv/registry"));
        assert!(!LocalProvider.matches("ui/button"));
        assert!(!LocalProvider.matches("github/acme/lib"));
    }

    #[test]
    fn reads_file_from_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/ui")).unwrap();
        fs::write(temp.path().join("src/ui/button.ts"), "export {};").unwrap();

        let registry = format!("fs/{}", temp.path().display());
        let content = LocalProvider.fetch_raw(&registry, "src/ui/button.ts").unwrap();
        assert_eq!(content, "export {};");
    }

    #[test]
    fn missing_file_is_fetch_failure() {
        let temp = TempDir::new().unwrap();
        let registry = temp.path().display().to_string();
        let result = LocalProvider.fetch_raw(&registry, "blocksmith-manifest.json");
        assert!(matches!(result, Err(BlocksmithError::FetchFailed { .. })));
    }

    #[test]
    fn parse_keeps_registry_path() {
        let parsed = LocalProvider.parse("./registry/ui/button", true).unwrap();
        assert_eq!(parsed.registry_url, "./registry");
        assert_eq!(parsed.qualified(), "./registry/ui/button");
    }
}
