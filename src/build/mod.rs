//! Registry-side graph construction.
//!
//! This module turns a registry's source tree into the categories written to
//! the manifest:
//! - [`BlockGraphBuilder`] walks each category root
//! - [`IgnoreRules`] filters paths the way `.gitignore` does
//! - [`Diagnostics`] collects the warnings for skipped files
//! - [`prune`] drops blocks no listed block needs
//!
//! # Example
//!
//! ```
//! use blocksmith::build::{prune, BlockGraphBuilder, Diagnostics, IgnoreRules};
//! use blocksmith::config::BuildConfig;
//! use blocksmith::language::LanguageRegistry;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::create_dir_all(temp.path().join("src/ui")).unwrap();
//! fs::write(temp.path().join("src/ui/button.ts"), "export {};").unwrap();
//!
//! let config = BuildConfig { dirs: vec!["src".into()], ..Default::default() };
//! let languages = LanguageRegistry::default();
//! let ignore = IgnoreRules::empty();
//! let mut diagnostics = Diagnostics::new();
//!
//! let categories = BlockGraphBuilder::new(temp.path(), &config, &languages, &ignore)
//!     .build_all(&mut diagnostics)
//!     .unwrap();
//! let categories = prune(categories);
//! assert_eq!(categories[0].blocks[0].specifier(), "ui/button");
//! ```

pub mod builder;
pub mod diagnostic;
pub mod ignore;
pub mod prune;

pub use builder::BlockGraphBuilder;
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use ignore::IgnoreRules;
pub use prune::prune;
