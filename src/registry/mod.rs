//! Consumer-side registry access.
//!
//! This module reads published registries and plans installs:
//! - [`RegistryProvider`] implementations know where a registry lives
//!   (GitHub, GitLab, a web server, a local directory)
//! - [`fetch_blocks`] loads every registry's manifest into a [`BlockMap`]
//! - [`resolve_tree`] turns requested specifiers into an install plan
//! - [`get_installed`] finds the blocks already present in a project
//! - [`Installer`] writes planned blocks into the project
//!
//! # Provider order
//!
//! Providers are tried in this order (first match wins):
//! 1. `github/...` and `https://github.com/...`
//! 2. `gitlab/...` and `https://gitlab.com/...`
//! 3. any other `http(s)://` URL
//! 4. `fs/...` and filesystem paths
//!
//! # Example
//!
//! ```
//! use blocksmith::registry::ProviderRegistry;
//!
//! let providers = ProviderRegistry::default();
//! let state = providers.state("https://github.com/acme/lib").unwrap();
//! assert_eq!(state.url, "github/acme/lib");
//! ```

pub mod fetch;
pub mod git_host;
pub mod github;
pub mod gitlab;
pub mod http;
pub mod installed;
pub mod installer;
pub mod local;
pub mod provider;
pub mod remote;
pub mod resolver;

// Re-exports
pub use fetch::{FetchResponse, HttpFetcher};
pub use github::GitHubProvider;
pub use gitlab::GitLabProvider;
pub use http::HttpProvider;
pub use installed::{get_installed, install_dir, install_path, InstalledBlock};
pub use installer::{planned_files, watermark, FileCopy, Installer};
pub use local::LocalProvider;
pub use provider::{ParsedSpecifier, ProviderRegistry, RegistryProvider, RegistryProviderState};
pub use remote::{fetch_blocks, fetch_manifest, index_manifest, BlockMap, RemoteBlock};
pub use resolver::{resolve_tree, InstallingBlock, TreeResolver};
