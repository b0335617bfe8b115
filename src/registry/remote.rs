//! Loading registry manifests into a map of remote blocks.

use std::collections::BTreeMap;
use std::ops::Deref;

use crate::error::Result;
use crate::manifest::{Block, Manifest, MANIFEST_FILE};

use super::provider::RegistryProviderState;

/// A block fetched from a registry, tagged with the registry it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBlock {
    pub block: Block,
    /// Canonical URL of the owning registry.
    pub registry_url: String,
}

impl RemoteBlock {
    /// The fully-qualified `<registry>/<category>/<name>` specifier.
    pub fn full_specifier(&self) -> String {
        format!("{}/{}", self.registry_url, self.block.specifier())
    }

    /// Qualify a `category/name` specifier against this block's registry.
    pub fn qualify(&self, specifier: &str) -> String {
        format!("{}/{}", self.registry_url, specifier)
    }
}

impl Deref for RemoteBlock {
    type Target = Block;

    fn deref(&self) -> &Block {
        &self.block
    }
}

/// Every known remote block, keyed by fully-qualified specifier.
pub type BlockMap = BTreeMap<String, RemoteBlock>;

/// Fetch and validate the manifest of one registry.
pub fn fetch_manifest(state: &RegistryProviderState) -> Result<Manifest> {
    tracing::debug!("Fetching manifest from {}", state.url);
    let content = state.fetch_raw(MANIFEST_FILE)?;
    Manifest::from_json(&content, &state.url)
}

/// Index the blocks of `manifest` under `registry_url`.
pub fn index_manifest(registry_url: &str, manifest: Manifest, blocks: &mut BlockMap) {
    for category in manifest.categories {
        for block in category.blocks {
            let remote = RemoteBlock {
                block,
                registry_url: registry_url.to_string(),
            };
            blocks.entry(remote.full_specifier()).or_insert(remote);
        }
    }
}

/// Fetch every registry's manifest, in order.
///
/// # Errors
///
/// The first registry that cannot be fetched or whose manifest is invalid
/// aborts the load.
pub fn fetch_blocks(states: &[RegistryProviderState]) -> Result<BlockMap> {
    let mut blocks = BlockMap::new();
    for state in states {
        let manifest = fetch_manifest(state)?;
        index_manifest(&state.url, manifest, &mut blocks);
    }
    tracing::debug!("Loaded {} blocks from {} registries", blocks.len(), states.len());
    Ok(blocks)
}
