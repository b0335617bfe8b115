//! Block graph construction from a registry's source tree.
//!
//! Every directory directly under a category root is a category. Inside a
//! category, each regular file is a single-file block and each directory is
//! a subdirectory block (when `allowSubdirectories` is on). Test files are
//! attached to the block they belong to instead of forming blocks.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::error::{BlocksmithError, Result};
use crate::language::{
    block_name, is_test_file, test_file_base, LanguageRegistry, ResolveContext,
    ResolvedDependencies,
};
use crate::manifest::{Block, Category};
use crate::policy;

use super::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use super::ignore::IgnoreRules;

/// One entry of a directory listing.
#[derive(Debug)]
struct Entry {
    name: String,
    is_dir: bool,
}

/// Read a directory, sorted by name so builds are reproducible.
fn read_entries(cwd: &Path, dir: &Path) -> Result<Vec<Entry>> {
    let abs = cwd.join(dir);
    let unavailable = |source| BlocksmithError::IoUnavailable {
        path: abs.clone(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(&abs).map_err(unavailable)? {
        let entry = entry.map_err(unavailable)?;
        let file_type = entry.file_type().map_err(unavailable)?;
        if !file_type.is_dir() && !file_type.is_file() {
            continue;
        }
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: file_type.is_dir(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn duplicate(path: &Path, category: &str, block: &str) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::DuplicateBlockName,
        path,
        format!("Block '{}/{}' already exists; skipped", category, block),
    )
}

/// Path of a block's directory or primary file, for diagnostics.
fn primary_path(block: &Block) -> PathBuf {
    match block.files.first() {
        Some(file) if !block.subdirectory => block.directory.join(file),
        _ => block.directory.clone(),
    }
}

/// Fold `other` into `into`; blocks already present in `into` win.
fn merge_category(into: &mut Category, other: Category, diagnostics: &mut Diagnostics) {
    for block in other.blocks {
        if into.blocks.iter().any(|b| b.name == block.name) {
            diagnostics.push(duplicate(&primary_path(&block), &into.name, &block.name));
            continue;
        }
        into.blocks.push(block);
    }
}

/// Files and dependency data gathered while walking a subdirectory block.
#[derive(Debug, Default)]
struct Walk {
    files: Vec<String>,
    test_files: Vec<String>,
    resolved: ResolvedDependencies,
    dev_dependencies: BTreeSet<String>,
}

impl Walk {
    fn merge(&mut self, other: Walk) {
        self.files.extend(other.files);
        self.test_files.extend(other.test_files);
        self.resolved.merge(other.resolved);
        self.dev_dependencies.extend(other.dev_dependencies);
    }
}

/// Builds categories and blocks from the directories named in a
/// [`BuildConfig`].
#[derive(Debug)]
pub struct BlockGraphBuilder<'a> {
    cwd: &'a Path,
    config: &'a BuildConfig,
    languages: &'a LanguageRegistry,
    ignore: &'a IgnoreRules,
}

impl<'a> BlockGraphBuilder<'a> {
    /// Create a builder rooted at `cwd`, the registry root.
    pub fn new(
        cwd: &'a Path,
        config: &'a BuildConfig,
        languages: &'a LanguageRegistry,
        ignore: &'a IgnoreRules,
    ) -> Self {
        Self {
            cwd,
            config,
            languages,
            ignore,
        }
    }

    /// Build every configured category root, in `dirs` order.
    ///
    /// Categories with the same name under different roots are merged into
    /// one; when two roots provide the same block the earlier root wins.
    pub fn build_all(&self, diagnostics: &mut Diagnostics) -> Result<Vec<Category>> {
        let mut categories: Vec<Category> = Vec::new();
        for dir in &self.config.dirs {
            for category in self.build(dir, diagnostics)? {
                match categories.iter_mut().find(|c| c.name == category.name) {
                    Some(existing) => merge_category(existing, category, diagnostics),
                    None => categories.push(category),
                }
            }
        }
        Ok(categories)
    }

    /// Build the categories under one root directory (relative to `cwd`).
    ///
    /// # Errors
    ///
    /// Returns `IoUnavailable` if a directory can't be enumerated and
    /// `DependencyResolutionFailed` if a resolver rejects a file.
    pub fn build(&self, root: &Path, diagnostics: &mut Diagnostics) -> Result<Vec<Category>> {
        let mut categories = Vec::new();

        for entry in read_entries(self.cwd, root)? {
            if !entry.is_dir {
                continue;
            }

            let dir = root.join(&entry.name);
            if self.ignore.is_ignored(&dir, true) {
                tracing::debug!("Ignoring category directory {}", dir.display());
                continue;
            }
            if !policy::should_include_category(&entry.name, self.config) {
                tracing::debug!("Category '{}' excluded by config", entry.name);
                continue;
            }

            categories.push(self.build_category(&entry.name, &dir, diagnostics)?);
        }

        Ok(categories)
    }

    fn build_category(
        &self,
        name: &str,
        dir: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<Category> {
        let list_category = policy::should_list_category(name, self.config);
        let entries = read_entries(self.cwd, dir)?;
        let mut category = Category::new(name);

        for entry in &entries {
            let path = dir.join(&entry.name);
            if self.ignore.is_ignored(&path, entry.is_dir) {
                continue;
            }

            let block_name = if entry.is_dir {
                entry.name.clone()
            } else if is_test_file(&entry.name) {
                continue;
            } else {
                block_name(&entry.name)
            };

            if !policy::should_include_block(&block_name, self.config) {
                tracing::debug!("Block '{}/{}' excluded by config", name, block_name);
                continue;
            }

            let mut replaces = None;
            if let Some(idx) = category.blocks.iter().position(|b| b.name == block_name) {
                if entry.is_dir || !self.outranks(&entry.name, &category.blocks[idx]) {
                    diagnostics.push(duplicate(&path, name, &block_name));
                    continue;
                }
                replaces = Some(idx);
            }

            let list = list_category && policy::should_list_block(&block_name, self.config);

            let block = if entry.is_dir {
                self.subdirectory_block(name, block_name, &path, list, diagnostics)?
            } else {
                self.file_block(name, block_name, dir, &entry.name, &entries, list, diagnostics)?
            };

            match (block, replaces) {
                (Some(block), Some(idx)) => {
                    let displaced = std::mem::replace(&mut category.blocks[idx], block);
                    diagnostics.push(duplicate(&primary_path(&displaced), name, &displaced.name));
                }
                (Some(block), None) => category.blocks.push(block),
                (None, _) => {}
            }
        }

        Ok(category)
    }

    /// Does `file_name` belong to a block ahead of `existing`?
    ///
    /// Single files sharing a name (`button.ts`, `button.css`) go to the
    /// resolver registered first.
    fn outranks(&self, file_name: &str, existing: &Block) -> bool {
        if existing.subdirectory {
            return false;
        }
        let current = existing
            .files
            .first()
            .and_then(|f| self.languages.position(f));
        match (self.languages.position(file_name), current) {
            (Some(new), Some(old)) => new < old,
            _ => false,
        }
    }

    fn context<'c>(
        &'c self,
        file_path: &'c Path,
        containing_directory: Option<&'c Path>,
    ) -> ResolveContext<'c> {
        ResolveContext {
            file_path,
            is_subdirectory: containing_directory.is_some(),
            excluded_dependency_names: &self.config.exclude_deps,
            search_directories: &self.config.dirs,
            containing_directory,
            cwd: self.cwd,
        }
    }

    /// External packages of a test file, reported as dev dependencies.
    fn test_dependencies(
        &self,
        path: &Path,
        containing_directory: Option<&Path>,
    ) -> Result<BTreeSet<String>> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(language) = self.languages.select(&file_name) else {
            return Ok(BTreeSet::new());
        };

        let resolved = language.resolve_dependencies(&self.context(path, containing_directory))?;
        Ok(resolved
            .dependencies
            .into_iter()
            .chain(resolved.dev_dependencies)
            .collect())
    }

    #[allow(clippy::too_many_arguments)]
    fn file_block(
        &self,
        category: &str,
        name: String,
        dir: &Path,
        file_name: &str,
        siblings: &[Entry],
        list: bool,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<Block>> {
        let path = dir.join(file_name);
        let Some(language) = self.languages.select(file_name) else {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnsupportedFile,
                &path,
                "No language resolver handles this file; skipped",
            ));
            return Ok(None);
        };

        let resolved = language.resolve_dependencies(&self.context(&path, None))?;

        let test_files: Vec<&str> = siblings
            .iter()
            .filter(|e| !e.is_dir && test_file_base(&e.name) == Some(name.as_str()))
            .filter(|e| !self.ignore.is_ignored(&dir.join(&e.name), false))
            .map(|e| e.name.as_str())
            .collect();

        let mut dev_dependencies = resolved.dev_dependencies;
        for test in &test_files {
            dev_dependencies.extend(self.test_dependencies(&dir.join(test), None)?);
        }

        let mut files = vec![file_name.to_string()];
        files.extend(test_files.iter().map(|t| t.to_string()));

        Ok(Some(self.finish_block(
            category,
            name,
            dir.to_path_buf(),
            files,
            false,
            !test_files.is_empty(),
            list,
            ResolvedDependencies {
                dev_dependencies,
                ..resolved
            },
        )))
    }

    fn subdirectory_block(
        &self,
        category: &str,
        name: String,
        dir: &Path,
        list: bool,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<Block>> {
        if !self.config.allow_subdirectories {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::SubdirectoryDisallowed,
                    dir,
                    format!("Subdirectory block '{}/{}' skipped", category, name),
                )
                .with_hint("set `allowSubdirectories: true` in .blocksmith/build.yml to include it"),
            );
            return Ok(None);
        }

        let walk = self.walk(dir, dir, diagnostics)?;
        if walk.files.is_empty() {
            tracing::debug!("Subdirectory {} has no source files", dir.display());
            return Ok(None);
        }

        let has_tests = !walk.test_files.is_empty();
        let mut files = walk.files;
        files.extend(walk.test_files);

        let mut resolved = walk.resolved;
        resolved.dev_dependencies.extend(walk.dev_dependencies);

        Ok(Some(self.finish_block(
            category,
            name,
            dir.to_path_buf(),
            files,
            true,
            has_tests,
            list,
            resolved,
        )))
    }

    /// Depth-first walk of a subdirectory block; file paths are relative to
    /// `block_dir`.
    fn walk(&self, dir: &Path, block_dir: &Path, diagnostics: &mut Diagnostics) -> Result<Walk> {
        let mut walk = Walk::default();

        for entry in read_entries(self.cwd, dir)? {
            let path = dir.join(&entry.name);
            if self.ignore.is_ignored(&path, entry.is_dir) {
                continue;
            }

            if entry.is_dir {
                let child = self.walk(&path, block_dir, diagnostics)?;
                walk.merge(child);
                continue;
            }

            let relative = path
                .strip_prefix(block_dir)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");

            if is_test_file(&entry.name) {
                walk.dev_dependencies
                    .extend(self.test_dependencies(&path, Some(block_dir))?);
                walk.test_files.push(relative);
                continue;
            }

            let Some(language) = self.languages.select(&entry.name) else {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UnsupportedFile,
                    &path,
                    "No language resolver handles this file; skipped",
                ));
                continue;
            };

            let resolved = language.resolve_dependencies(&self.context(&path, Some(block_dir)))?;
            walk.resolved.merge(resolved);
            walk.files.push(relative);
        }

        Ok(walk)
    }

    #[allow(clippy::too_many_arguments)]
    fn finish_block(
        &self,
        category: &str,
        name: String,
        directory: PathBuf,
        files: Vec<String>,
        subdirectory: bool,
        tests: bool,
        list: bool,
        resolved: ResolvedDependencies,
    ) -> Block {
        let specifier = format!("{}/{}", category, name);
        let mut local_dependencies = resolved.local_dependencies;
        local_dependencies.remove(&specifier);

        let mut dev_dependencies = resolved.dev_dependencies;
        dev_dependencies.retain(|d| !resolved.dependencies.contains(d));

        tracing::debug!(
            "Built block {} ({} files, {} local deps)",
            specifier,
            files.len(),
            local_dependencies.len()
        );

        Block {
            name,
            category: category.to_string(),
            directory,
            files,
            subdirectory,
            tests,
            list,
            local_dependencies,
            dependencies: resolved.dependencies,
            dev_dependencies,
            imports: resolved.imports,
        }
    }
}
