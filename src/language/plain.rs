//! Assets that are distributed as-is.

use std::path::Path;

use super::{LanguageResolver, ResolveContext, ResolvedDependencies};
use crate::error::Result;

const EXTENSIONS: &[&str] = &["css", "scss", "json", "yaml", "yml", "md", "svg", "html"];

/// Resolver for stylesheets, data and markup files, which never carry
/// dependencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainResolver;

impl LanguageResolver for PlainResolver {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn matches(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| EXTENSIONS.contains(&e))
    }

    fn resolve_dependencies(&self, _ctx: &ResolveContext<'_>) -> Result<ResolvedDependencies> {
        Ok(ResolvedDependencies::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_assets_only() {
        assert!(PlainResolver.matches("theme.css"));
        assert!(PlainResolver.matches("tokens.json"));
        assert!(!PlainResolver.matches("button.ts"));
    }

    #[test]
    fn reports_nothing() {
        let ctx = ResolveContext {
            file_path: Path::new("src/ui/theme.css"),
            is_subdirectory: false,
            excluded_dependency_names: &[],
            search_directories: &[],
            containing_directory: None,
            cwd: Path::new("."),
        };
        assert_eq!(
            PlainResolver.resolve_dependencies(&ctx).unwrap(),
            ResolvedDependencies::default()
        );
    }
}
