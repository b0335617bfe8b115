//! Per-language dependency extraction.
//!
//! A [`LanguageResolver`] recognises the files of one source language and
//! reports, for a single file, which third-party packages and which other
//! blocks it depends on. Resolvers are kept in a [`LanguageRegistry`] and
//! selected by first match, so registration order matters.
//!
//! # Example
//!
//! ```
//! use blocksmith::language::LanguageRegistry;
//!
//! let languages = LanguageRegistry::default();
//! assert_eq!(languages.select("button.ts").map(|l| l.name()), Some("javascript"));
//! assert!(languages.select("Makefile").is_none());
//! ```

pub mod javascript;
pub mod paths;
pub mod plain;

pub use javascript::JavaScriptResolver;
pub use paths::{block_name, is_test_file, test_file_base};
pub use plain::PlainResolver;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Everything a resolver needs to analyse one file.
///
/// Paths other than `cwd` are relative to `cwd`.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// The file being analysed.
    pub file_path: &'a Path,
    /// Whether the file belongs to a subdirectory block.
    pub is_subdirectory: bool,
    /// Package names that must not be reported.
    pub excluded_dependency_names: &'a [String],
    /// Category roots; imports landing under one become local dependencies.
    pub search_directories: &'a [PathBuf],
    /// Directory of the owning subdirectory block, if any.
    pub containing_directory: Option<&'a Path>,
    /// Registry root.
    pub cwd: &'a Path,
}

/// Dependency information extracted from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDependencies {
    /// Third-party packages.
    pub dependencies: BTreeSet<String>,
    /// Third-party packages only needed for development.
    pub dev_dependencies: BTreeSet<String>,
    /// Other blocks, as `category/name`.
    pub local_dependencies: BTreeSet<String>,
    /// Import literal to resolved module.
    pub imports: BTreeMap<String, String>,
}

impl ResolvedDependencies {
    /// Fold another file's results into this one.
    pub fn merge(&mut self, other: ResolvedDependencies) {
        self.dependencies.extend(other.dependencies);
        self.dev_dependencies.extend(other.dev_dependencies);
        self.local_dependencies.extend(other.local_dependencies);
        self.imports.extend(other.imports);
    }
}

/// Dependency extraction for one source language.
pub trait LanguageResolver: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Does this resolver handle `file_name`?
    fn matches(&self, file_name: &str) -> bool;

    /// Extract the dependencies of `ctx.file_path`.
    ///
    /// # Errors
    ///
    /// Returns `DependencyResolutionFailed` when the file can't be read or an
    /// import can't be classified.
    fn resolve_dependencies(&self, ctx: &ResolveContext<'_>) -> Result<ResolvedDependencies>;
}

/// Ordered collection of language resolvers.
pub struct LanguageRegistry {
    resolvers: Vec<Box<dyn LanguageResolver>>,
}

impl LanguageRegistry {
    /// Create a registry with no resolvers.
    pub fn empty() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// Append a resolver; earlier resolvers win.
    pub fn register(mut self, resolver: impl LanguageResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// The first resolver matching `file_name`.
    pub fn select(&self, file_name: &str) -> Option<&dyn LanguageResolver> {
        self.resolvers
            .iter()
            .find(|r| r.matches(file_name))
            .map(|r| r.as_ref())
    }

    /// Registration index of the resolver that handles `file_name`.
    pub fn position(&self, file_name: &str) -> Option<usize> {
        self.resolvers.iter().position(|r| r.matches(file_name))
    }

    /// Number of registered resolvers.
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Check if no resolvers are registered.
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::empty()
            .register(JavaScriptResolver::new())
            .register(PlainResolver)
    }
}

impl std::fmt::Debug for LanguageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.resolvers.iter().map(|r| r.name()).collect();
        f.debug_struct("LanguageRegistry")
            .field("resolvers", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_order() {
        let languages = LanguageRegistry::default();
        assert_eq!(languages.len(), 2);
        assert_eq!(languages.select("a.tsx").unwrap().name(), "javascript");
        assert_eq!(languages.select("a.css").unwrap().name(), "plain");
        assert_eq!(languages.position("a.ts"), Some(0));
        assert_eq!(languages.position("a.css"), Some(1));
        assert_eq!(languages.position("a.rb"), None);
    }

    #[test]
    fn empty_registry_matches_nothing() {
        let languages = LanguageRegistry::empty();
        assert!(languages.is_empty());
        assert!(languages.select("a.ts").is_none());
    }

    #[test]
    fn merge_unions_everything() {
        let mut a = ResolvedDependencies::default();
        a.dependencies.insert("react".into());
        a.local_dependencies.insert("ui/icon".into());

        let mut b = ResolvedDependencies::default();
        b.dependencies.insert("clsx".into());
        b.local_dependencies.insert("ui/icon".into());
        b.imports.insert("clsx".into(), "clsx".into());

        a.merge(b);
        assert_eq!(a.dependencies.len(), 2);
        assert_eq!(a.local_dependencies.len(), 1);
        assert_eq!(a.imports.get("clsx"), Some(&"clsx".to_string()));
    }
}
