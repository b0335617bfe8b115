//! Install-plan resolution.
//!
//! Turns the specifiers a user asked for into the full list of blocks to
//! install: each requested block plus its transitive local dependencies,
//! each exactly once.
//!
//! Resolution order for one specifier:
//! 1. A fully-qualified specifier (`github/acme/lib/ui/button`) is parsed by
//!    the provider that claims it.
//! 2. A bare specifier (`ui/button`) is probed against each configured
//!    registry in order; the first registry containing it wins. Exactly two
//!    segments always make a bare specifier, so `fs/button` names the
//!    `fs` category.

use std::collections::HashSet;

use crate::error::{BlocksmithError, Result};

use super::provider::{invalid, ProviderRegistry, RegistryProviderState};
use super::remote::{BlockMap, RemoteBlock};

/// One entry of an install plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallingBlock {
    /// Fully-qualified specifier.
    pub specifier: String,
    pub block: RemoteBlock,
    /// True when the block is only installed because something needs it.
    pub sub_dependency: bool,
}

/// Resolves specifiers against the known remote blocks.
#[derive(Debug)]
pub struct TreeResolver<'a> {
    known: &'a BlockMap,
    registries: &'a [RegistryProviderState],
    providers: &'a ProviderRegistry,
}

impl<'a> TreeResolver<'a> {
    pub fn new(
        known: &'a BlockMap,
        registries: &'a [RegistryProviderState],
        providers: &'a ProviderRegistry,
    ) -> Self {
        Self {
            known,
            registries,
            providers,
        }
    }

    /// Resolve `requested` and everything it depends on.
    ///
    /// Dependencies in `already_installed` (fully-qualified) are not pulled
    /// in again; requested blocks always are.
    ///
    /// # Errors
    ///
    /// The first specifier that cannot be resolved, at any depth, aborts the
    /// whole resolution.
    pub fn resolve(
        &self,
        requested: &[String],
        already_installed: &HashSet<String>,
    ) -> Result<Vec<InstallingBlock>> {
        self.resolve_batch(requested, false, already_installed)
    }

    /// Find the block a single specifier refers to.
    pub fn find(&self, specifier: &str) -> Result<&'a RemoteBlock> {
        if let Some(provider) = self.providers.select_qualified(specifier) {
            let parsed = provider.parse(specifier, true)?;
            return self.lookup(&parsed.qualified(), specifier);
        }

        if self.registries.is_empty() {
            return Err(BlocksmithError::NoRepositoryConfigured {
                specifier: specifier.to_string(),
            });
        }

        match specifier.split('/').collect::<Vec<_>>().as_slice() {
            [category, name] if !category.is_empty() && !name.is_empty() => {}
            _ => return Err(invalid(specifier, "expected <category>/<name>")),
        }

        for state in self.registries {
            let parsed = state.parse(specifier)?;
            if let Some(block) = self.known.get(&parsed.qualified()) {
                tracing::debug!("Resolved {} in {}", specifier, state.url);
                return Ok(block);
            }
        }

        Err(BlocksmithError::BlockNotFound {
            specifier: specifier.to_string(),
        })
    }

    fn lookup(&self, qualified: &str, requested: &str) -> Result<&'a RemoteBlock> {
        self.known
            .get(qualified)
            .ok_or_else(|| BlocksmithError::BlockNotFound {
                specifier: requested.to_string(),
            })
    }

    /// Resolve one level of specifiers, recursing into their dependencies.
    ///
    /// `excluded` holds everything resolved by callers further up plus the
    /// installed blocks; a specifier in it is never visited again, which is
    /// what makes dependency cycles terminate.
    fn resolve_batch(
        &self,
        requested: &[String],
        sub_dependency: bool,
        excluded: &HashSet<String>,
    ) -> Result<Vec<InstallingBlock>> {
        let mut batch: Vec<InstallingBlock> = Vec::new();
        let mut in_batch: HashSet<String> = HashSet::new();

        for specifier in requested {
            let block = self.find(specifier)?;
            let full = block.full_specifier();
            if !in_batch.insert(full.clone()) {
                // A direct request keeps its place but is no longer a dependency.
                if !sub_dependency {
                    if let Some(existing) = batch.iter_mut().find(|b| b.specifier == full) {
                        existing.sub_dependency = false;
                    }
                }
                continue;
            }
            batch.push(InstallingBlock {
                specifier: full,
                block: block.clone(),
                sub_dependency,
            });

            let dependencies: Vec<String> = block
                .local_dependencies
                .iter()
                .map(|dep| block.qualify(dep))
                .filter(|dep| !in_batch.contains(dep) && !excluded.contains(dep))
                .collect();
            if dependencies.is_empty() {
                continue;
            }

            let nested_excluded: HashSet<String> =
                excluded.union(&in_batch).cloned().collect();
            for resolved in self.resolve_batch(&dependencies, true, &nested_excluded)? {
                if in_batch.insert(resolved.specifier.clone()) {
                    batch.push(resolved);
                }
            }
        }

        Ok(batch)
    }
}

/// Compute the install plan for `requested`.
///
/// See [`TreeResolver::resolve`].
pub fn resolve_tree(
    requested: &[String],
    known: &BlockMap,
    registries: &[RegistryProviderState],
    providers: &ProviderRegistry,
    already_installed: &HashSet<String>,
) -> Result<Vec<InstallingBlock>> {
    TreeResolver::new(known, registries, providers).resolve(requested, already_installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{tests::block, Category, Manifest};
    use crate::registry::remote::index_manifest;

    const LIB: &str = "github/acme/lib";
    const OTHER: &str = "github/acme/other";

    fn known() -> BlockMap {
        let mut blocks = BlockMap::new();
        index_manifest(
            LIB,
            Manifest::new(vec![
                Category {
                    name: "ui".into(),
                    blocks: vec![
                        block("ui", "button", &["ui/icon"]),
                        block("ui", "icon", &["theme/tokens"]),
                        block("ui", "a", &["ui/b"]),
                        block("ui", "b", &["ui/a"]),
                    ],
                },
                Category {
                    name: "theme".into(),
                    blocks: vec![block("theme", "tokens", &[])],
                },
            ]),
            &mut blocks,
        );
        index_manifest(
            OTHER,
            Manifest::new(vec![
                Category {
                    name: "ui".into(),
                    blocks: vec![block("ui", "button", &[]), block("ui", "card", &[])],
                },
                Category {
                    name: "fs".into(),
                    blocks: vec![block("fs", "watcher", &[])],
                },
            ]),
            &mut blocks,
        );
        blocks
    }

    fn plan(
        requested: &[&str],
        registries: &[&str],
        installed: &[&str],
    ) -> Result<Vec<(String, bool)>> {
        let providers = ProviderRegistry::default();
        let urls: Vec<String> = registries.iter().map(|s| s.to_string()).collect();
        let states = providers.states(&urls)?;
        let requested: Vec<String> = requested.iter().map(|s| s.to_string()).collect();
        let installed = installed.iter().map(|s| s.to_string()).collect();

        let known = known();
        Ok(resolve_tree(&requested, &known, &states, &providers, &installed)?
            .into_iter()
            .map(|b| (b.specifier, b.sub_dependency))
            .collect())
    }

    fn entry(spec: &str, sub: bool) -> (String, bool) {
        (spec.to_string(), sub)
    }

    #[test]
    fn qualified_specifier_pulls_transitive_dependencies() {
        let result = plan(&["github/acme/lib/ui/button"], &[], &[]).unwrap();
        assert_eq!(
            result,
            vec![
                entry("github/acme/lib/ui/button", false),
                entry("github/acme/lib/ui/icon", true),
                entry("github/acme/lib/theme/tokens", true),
            ]
        );
    }

    #[test]
    fn cycle_terminates_with_one_entry_each() {
        let result = plan(&["ui/a"], &[LIB], &[]).unwrap();
        assert_eq!(
            result,
            vec![
                entry("github/acme/lib/ui/a", false),
                entry("github/acme/lib/ui/b", true),
            ]
        );
    }

    #[test]
    fn bare_specifier_without_registries_fails() {
        let result = plan(&["ui/button"], &[], &[]);
        assert!(matches!(
            result,
            Err(BlocksmithError::NoRepositoryConfigured { .. })
        ));
    }

    #[test]
    fn first_registry_wins() {
        let result = plan(&["ui/button"], &[OTHER, LIB], &[]).unwrap();
        assert_eq!(result, vec![entry("github/acme/other/ui/button", false)]);
    }

    #[test]
    fn falls_through_to_later_registry() {
        let result = plan(&["theme/tokens"], &[OTHER, LIB], &[]).unwrap();
        assert_eq!(result, vec![entry("github/acme/lib/theme/tokens", false)]);
    }

    #[test]
    fn missing_block_is_not_found() {
        let result = plan(&["ui/missing"], &[LIB], &[]);
        assert!(matches!(result, Err(BlocksmithError::BlockNotFound { .. })));

        let result = plan(&["github/acme/lib/ui/missing"], &[], &[]);
        assert!(matches!(result, Err(BlocksmithError::BlockNotFound { .. })));
    }

    #[test]
    fn category_named_like_a_provider_prefix_resolves_bare() {
        let result = plan(&["fs/watcher"], &[LIB, OTHER], &[]).unwrap();
        assert_eq!(result, vec![entry("github/acme/other/fs/watcher", false)]);
    }

    #[test]
    fn malformed_bare_specifier_is_invalid() {
        let result = plan(&["button"], &[LIB], &[]);
        assert!(matches!(result, Err(BlocksmithError::InvalidSpecifier { .. })));
    }

    #[test]
    fn installed_dependencies_are_skipped() {
        let result = plan(&["ui/button"], &[LIB], &["github/acme/lib/ui/icon"]).unwrap();
        assert_eq!(result, vec![entry("github/acme/lib/ui/button", false)]);
    }

    #[test]
    fn later_request_of_a_dependency_is_not_duplicated() {
        let result = plan(&["ui/button", "ui/icon"], &[LIB], &[]).unwrap();
        assert_eq!(
            result,
            vec![
                entry("github/acme/lib/ui/button", false),
                entry("github/acme/lib/ui/icon", false),
                entry("github/acme/lib/theme/tokens", true),
            ]
        );
    }

    #[test]
    fn transitive_dependency_requested_later_is_direct() {
        let result = plan(&["ui/button", "theme/tokens"], &[LIB], &[]).unwrap();
        assert_eq!(
            result,
            vec![
                entry("github/acme/lib/ui/button", false),
                entry("github/acme/lib/ui/icon", true),
                entry("github/acme/lib/theme/tokens", false),
            ]
        );
    }

    #[test]
    fn duplicate_requests_collapse() {
        let result = plan(
            &["ui/button", "github/acme/lib/ui/button"],
            &[LIB],
            &[],
        )
        .unwrap();
        assert_eq!(result.len(), 3);
    }
}
