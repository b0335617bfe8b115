//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations:
//! - `build` runs on a registry and writes its manifest
//! - `add` and `list` run on a consuming project

pub mod add;
pub mod build;
pub mod completions;
pub mod context;
pub mod dispatcher;
pub mod list;
pub mod schema;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
