//! Blocksmith - build and install reusable source-code blocks.
//!
//! A registry author runs `blocksmith build` to turn category directories
//! into a manifest of blocks and their dependencies. A consumer runs
//! `blocksmith add` to pull blocks, and everything they depend on, into a
//! project.
//!
//! # Modules
//!
//! - [`build`] - Block graph construction, ignore rules, pruning
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`language`] - Per-language dependency extraction
//! - [`manifest`] - Manifest wire types
//! - [`policy`] - Include and list predicates
//! - [`registry`] - Registry providers, install planning, installation
//! - [`ui`] - Prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use blocksmith::config::BuildConfig;
//! use blocksmith::policy::should_include_block;
//!
//! let config = BuildConfig {
//!     exclude_blocks: vec!["internal".to_string()],
//!     ..Default::default()
//! };
//! assert!(should_include_block("button", &config));
//! assert!(!should_include_block("internal", &config));
//! ```
//!
//! For end-to-end builds and installs, see the integration tests.

pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod language;
pub mod manifest;
pub mod policy;
pub mod registry;
pub mod ui;

pub use error::{BlocksmithError, Result};
