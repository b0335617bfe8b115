//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Blocksmith - build and install reusable source blocks.
#[derive(Debug, Parser)]
#[command(name = "blocksmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project or registry root (overrides current directory)
    #[arg(short, long, global = true, env = "BLOCKSMITH_PROJECT")]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the registry manifest from source directories
    Build(BuildArgs),

    /// Install blocks and their dependencies into the project
    Add(AddArgs),

    /// List the blocks available from configured registries
    List(ListArgs),

    /// Print the JSON Schema of the manifest format
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `build` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct BuildArgs {
    /// Category roots to build (comma-separated, overrides config)
    #[arg(long, value_delimiter = ',')]
    pub dirs: Vec<PathBuf>,

    /// Directory the manifest is written to (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat directories inside categories as blocks
    #[arg(long)]
    pub allow_subdirectories: bool,
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddArgs {
    /// Blocks to install (`category/name` or `<registry>/category/name`)
    #[arg(required = true)]
    pub blocks: Vec<String>,

    /// Show what would be installed without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite installed blocks without asking
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Include blocks that are not listed (dependency-only blocks)
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_build_flags() {
        let cli = Cli::try_parse_from([
            "blocksmith",
            "build",
            "--dirs",
            "src/a,src/b",
            "--allow-subdirectories",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.dirs, vec![PathBuf::from("src/a"), PathBuf::from("src/b")]);
                assert!(args.allow_subdirectories);
                assert!(args.output.is_none());
            }
            other => panic!("expected build, got {:?}", other),
        }
    }

    #[test]
    fn add_requires_a_block() {
        assert!(Cli::try_parse_from(["blocksmith", "add"]).is_err());
    }

    #[test]
    fn parses_add_with_global_flags() {
        let cli = Cli::try_parse_from([
            "blocksmith",
            "add",
            "ui/button",
            "github/acme/lib/ui/card",
            "--dry-run",
            "--quiet",
        ])
        .unwrap();
        assert!(cli.quiet);
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.blocks, vec!["ui/button", "github/acme/lib/ui/card"]);
                assert!(args.dry_run);
                assert!(!args.yes);
            }
            other => panic!("expected add, got {:?}", other),
        }
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["blocksmith", "list", "-v", "-q"]).is_err());
    }
}
