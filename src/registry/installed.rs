//! Detection of blocks already present in a project.
//!
//! A block counts as installed when its target path exists. Contents are
//! never compared.

use std::path::{Path, PathBuf};

use crate::config::{ProjectConfig, FALLBACK_PATH_KEY};
use crate::error::{BlocksmithError, Result};
use crate::manifest::Block;

use super::remote::{BlockMap, RemoteBlock};

/// A known block found in the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledBlock {
    /// Fully-qualified specifier.
    pub specifier: String,
    pub block: RemoteBlock,
    /// Path that was found, relative to `cwd` when the mapping is relative.
    pub path: PathBuf,
}

/// Directory the blocks of `category` are installed into.
///
/// A category without its own entry in `paths` lands in a directory named
/// after it under the `*` entry.
pub fn install_dir(category: &str, config: &ProjectConfig) -> Result<PathBuf> {
    if let Some(dir) = config.paths.get(category) {
        return Ok(dir.clone());
    }
    config
        .paths
        .get(FALLBACK_PATH_KEY)
        .map(|dir| dir.join(category))
        .ok_or_else(|| BlocksmithError::ConfigValidationError {
            message: format!(
                "no install path for category '{}'; add it or '{}' to paths",
                category, FALLBACK_PATH_KEY
            ),
        })
}

/// Where `block` is installed: its file for a single-file block, its
/// directory for a subdirectory block.
pub fn install_path(block: &Block, config: &ProjectConfig) -> Result<PathBuf> {
    let dir = install_dir(&block.category, config)?;
    if block.subdirectory {
        return Ok(dir.join(&block.name));
    }
    match block.files.first() {
        Some(file) => Ok(dir.join(file)),
        None => Ok(dir.join(&block.name)),
    }
}

/// Every block of `known` whose install path exists under `cwd`.
pub fn get_installed(
    known: &BlockMap,
    config: &ProjectConfig,
    cwd: &Path,
) -> Result<Vec<InstalledBlock>> {
    let mut installed = Vec::new();
    for (specifier, block) in known {
        let path = install_path(block, config)?;
        if cwd.join(&path).exists() {
            installed.push(InstalledBlock {
                specifier: specifier.clone(),
                block: block.clone(),
                path,
            });
        }
    }
    Ok(installed)
}
