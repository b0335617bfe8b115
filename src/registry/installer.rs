//! Writing resolved blocks into a project.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::error::{BlocksmithError, Result};
use crate::language::{is_test_file, JavaScriptResolver, LanguageResolver};
use crate::manifest::Block;

use super::installed::install_dir;
use super::provider::ProviderRegistry;
use super::resolver::InstallingBlock;

/// One file to copy from a registry into the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCopy {
    /// Path inside the registry.
    pub source: String,
    /// Destination, relative to the project root.
    pub target: PathBuf,
}

/// The files of `block` to install, honoring `includeTests`.
pub fn planned_files(block: &Block, config: &ProjectConfig) -> Result<Vec<FileCopy>> {
    let mut dir = install_dir(&block.category, config)?;
    if block.subdirectory {
        dir = dir.join(&block.name);
    }
    let directory = block.directory.to_string_lossy().replace('\\', "/");

    Ok(block
        .files
        .iter()
        .filter(|file| config.include_tests || !is_test_file(file_name(file)))
        .map(|file| FileCopy {
            source: format!("{}/{}", directory.trim_end_matches('/'), file),
            target: dir.join(file),
        })
        .collect())
}

/// Prefix script content with a provenance comment.
///
/// Other file types are returned untouched; they have no comment syntax
/// in common.
pub fn watermark(content: &str, specifier: &str, file: &str) -> String {
    if !JavaScriptResolver.matches(file_name(file)) {
        return content.to_string();
    }
    format!("// Installed from {} with blocksmith\n{}", specifier, content)
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Copies blocks from their registries into a project.
#[derive(Debug)]
pub struct Installer<'a> {
    providers: &'a ProviderRegistry,
    config: &'a ProjectConfig,
    cwd: &'a Path,
}

impl<'a> Installer<'a> {
    pub fn new(providers: &'a ProviderRegistry, config: &'a ProjectConfig, cwd: &'a Path) -> Self {
        Self {
            providers,
            config,
            cwd,
        }
    }

    /// Fetch and write every file of `item`, returning the written paths.
    ///
    /// Existing files are overwritten.
    pub fn install(&self, item: &InstallingBlock) -> Result<Vec<PathBuf>> {
        let state = self.providers.state(&item.block.registry_url)?;
        let mut written = Vec::new();

        for copy in planned_files(&item.block, self.config)? {
            let content = state.fetch_raw(&copy.source)?;
            let content = if self.config.watermark {
                watermark(&content, &item.specifier, &copy.source)
            } else {
                content
            };

            let target = self.cwd.join(&copy.target);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|source| BlocksmithError::IoUnavailable {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&target, content).map_err(|source| BlocksmithError::IoUnavailable {
                path: target.clone(),
                source,
            })?;
            tracing::debug!("Wrote {}", target.display());
            written.push(copy.target);
        }

        Ok(written)
    }
}
