//! Project state shared by the consumer commands.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::{load_project_config, validate_project, ProjectConfig};
use crate::error::{BlocksmithError, Result};
use crate::registry::{fetch_blocks, BlockMap, ProviderRegistry, RegistryProviderState};
use crate::ui::UserInterface;

/// Loaded project configuration bound to registry providers.
pub struct ProjectContext {
    pub config: ProjectConfig,
    pub providers: ProviderRegistry,
    /// Configured registries, in probe order.
    pub registries: Vec<RegistryProviderState>,
}

impl ProjectContext {
    /// Load `.blocksmith/config.yml` under `root`.
    ///
    /// Returns `Ok(None)` after reporting to `ui` when there is no config.
    pub fn load(root: &Path, ui: &mut dyn UserInterface) -> Result<Option<Self>> {
        let config = match load_project_config(root) {
            Ok(config) => config,
            Err(BlocksmithError::ConfigNotFound { path }) => {
                ui.error(&format!("No project configuration at {}", path.display()));
                ui.hint("Create it with `registries:` and `paths:` entries");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let providers = ProviderRegistry::default();
        validate_project(&config, &providers)?;
        let registries = providers.states(&config.registries)?;

        Ok(Some(Self {
            config,
            providers,
            registries,
        }))
    }

    /// Fetch the configured registries plus any registry named by a
    /// fully-qualified entry of `specifiers`.
    pub fn fetch_known(&self, specifiers: &[String]) -> Result<BlockMap> {
        let mut states = self.registries.clone();
        let mut seen: BTreeSet<String> = states.iter().map(|s| s.url.clone()).collect();

        for specifier in specifiers {
            let Some(provider) = self.providers.select_qualified(specifier) else {
                continue;
            };
            let parsed = provider.parse(specifier, true)?;
            if seen.insert(parsed.registry_url.clone()) {
                states.push(RegistryProviderState {
                    url: parsed.registry_url,
                    provider,
                });
            }
        }

        fetch_blocks(&states)
    }
}
