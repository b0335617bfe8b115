//! Configuration schema definitions for blocksmith.
//!
//! Two files are recognised:
//! - [`BuildConfig`] (`.blocksmith/build.yml`) drives the block graph builder
//!   in a registry repository.
//! - [`ProjectConfig`] (`.blocksmith/config.yml`) tells a consumer project
//!   which registries to pull from and where blocks are installed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Registry build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
    /// Category roots, relative to the registry root.
    pub dirs: Vec<PathBuf>,

    /// Directory the manifest is written to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Only these blocks end up in the manifest.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_blocks: Vec<String>,

    /// These blocks never end up in the manifest.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_blocks: Vec<String>,

    /// Only these blocks are user-facing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list_blocks: Vec<String>,

    /// These blocks are built but hidden from users.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub do_not_list_blocks: Vec<String>,

    /// Only these categories end up in the manifest.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_categories: Vec<String>,

    /// These categories never end up in the manifest.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_categories: Vec<String>,

    /// Only these categories are user-facing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list_categories: Vec<String>,

    /// These categories are built but hidden from users.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub do_not_list_categories: Vec<String>,

    /// Package names omitted from dependency extraction.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_deps: Vec<String>,

    /// Treat directories inside a category as blocks.
    #[serde(skip_serializing_if = "is_false")]
    pub allow_subdirectories: bool,

    /// Extra ignore patterns, combined with the root `.gitignore`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}

impl BuildConfig {
    /// Directory the manifest is written to, defaulting to the registry root.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Consumer project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Registries probed, in order, for bare specifiers.
    pub registries: Vec<String>,

    /// Category to install directory; `*` is the fallback.
    pub paths: BTreeMap<String, PathBuf>,

    /// Install test files alongside blocks.
    #[serde(skip_serializing_if = "is_false")]
    pub include_tests: bool,

    /// Prefix installed files with a provenance comment.
    pub watermark: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            registries: Vec::new(),
            paths: BTreeMap::new(),
            include_tests: false,
            watermark: true,
        }
    }
}

/// Key in [`ProjectConfig::paths`] used when a category has no entry.
pub const FALLBACK_PATH_KEY: &str = "*";

fn is_false(b: &bool) -> bool {
    !*b
}
