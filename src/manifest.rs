//! Manifest definitions.
//!
//! The manifest is the persisted output of a registry build and the input
//! of every consumer: an ordered list of categories, each holding the blocks
//! built from one directory. Field names are part of the wire format.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BlocksmithError, Result};

/// File name of the manifest at the root of a registry.
pub const MANIFEST_FILE: &str = "blocksmith-manifest.json";

/// A named group of blocks built from one directory under a category root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Category {
    /// Category name (the directory name).
    pub name: String,

    /// Blocks in filesystem enumeration order.
    pub blocks: Vec<Block>,
}

impl Category {
    /// Create an empty category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
        }
    }
}

/// A distributable unit of code: a single file or a directory subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Block {
    /// Block name, unique within its category.
    pub name: String,

    /// Name of the owning category.
    pub category: String,

    /// Directory holding the block's files, relative to the registry root.
    /// Always written with `/` separators.
    #[serde(with = "slash_path")]
    #[schemars(with = "String")]
    pub directory: PathBuf,

    /// Files relative to `directory`; test files come last.
    pub files: Vec<String>,

    /// Whether the block is a directory rather than a single file.
    pub subdirectory: bool,

    /// Whether test files were found for the block.
    pub tests: bool,

    /// Whether the block is user-facing.
    pub list: bool,

    /// Other blocks this block needs, as `category/name`.
    #[serde(default)]
    pub local_dependencies: BTreeSet<String>,

    /// Third-party packages.
    #[serde(default)]
    pub dependencies: BTreeSet<String>,

    /// Third-party packages only needed for development.
    #[serde(default)]
    pub dev_dependencies: BTreeSet<String>,

    /// Import literal to resolved module, kept for diagnostics.
    #[serde(default)]
    pub imports: BTreeMap<String, String>,
}

impl Block {
    /// The `category/name` specifier identifying this block.
    pub fn specifier(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

mod slash_path {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::path::{Path, PathBuf};

    pub fn serialize<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&path.to_string_lossy().replace('\\', "/"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PathBuf, D::Error> {
        String::deserialize(deserializer).map(PathBuf::from)
    }
}

/// The full manifest: categories in build order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Manifest {
    pub categories: Vec<Category>,
}

impl Manifest {
    /// Wrap built categories.
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Iterate over every block in every category.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.categories.iter().flat_map(|c| c.blocks.iter())
    }

    /// Parse and validate a manifest.
    ///
    /// `source_name` identifies where the JSON came from in error messages.
    pub fn from_json(content: &str, source_name: &str) -> Result<Self> {
        let manifest: Manifest =
            serde_json::from_str(content).map_err(|e| BlocksmithError::ManifestInvalid {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;

        manifest
            .validate()
            .map_err(|message| BlocksmithError::ManifestInvalid {
                source_name: source_name.to_string(),
                message,
            })?;

        Ok(manifest)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?)
    }

    /// Write the manifest into `dir`, returning the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(MANIFEST_FILE);
        fs::write(&path, self.to_json()?)?;
        Ok(path)
    }

    /// The JSON Schema of the manifest format.
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(Manifest)).unwrap_or_default()
    }

    /// Check the invariants serde can't express.
    fn validate(&self) -> std::result::Result<(), String> {
        let mut category_names = HashSet::new();

        for category in &self.categories {
            if !category_names.insert(category.name.as_str()) {
                return Err(format!("duplicate category '{}'", category.name));
            }

            let mut block_names = HashSet::new();
            for block in &category.blocks {
                let specifier = block.specifier();

                if block.name.contains('/') || block.name.contains('\\') {
                    return Err(format!("block name '{}' contains a separator", block.name));
                }
                if block.category != category.name {
                    return Err(format!(
                        "block '{}' listed under category '{}'",
                        specifier, category.name
                    ));
                }
                if !block_names.insert(block.name.as_str()) {
                    return Err(format!("duplicate block '{}'", specifier));
                }
                if block.files.is_empty() {
                    return Err(format!("block '{}' has no files", specifier));
                }
                if block.local_dependencies.contains(&specifier) {
                    return Err(format!("block '{}' depends on itself", specifier));
                }
            }
        }

        Ok(())
    }
}
