//! Build command implementation.
//!
//! The `blocksmith build` command turns a registry's source directories into
//! `blocksmith-manifest.json`.

use std::path::{Path, PathBuf};

use crate::build::{prune, BlockGraphBuilder, Diagnostics, IgnoreRules};
use crate::cli::args::BuildArgs;
use crate::config::{load_build_config, validate_build, BuildConfig};
use crate::error::{BlocksmithError, Result};
use crate::language::LanguageRegistry;
use crate::manifest::Manifest;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The build command implementation.
pub struct BuildCommand {
    project_root: PathBuf,
    args: BuildArgs,
}

impl BuildCommand {
    /// Create a new build command.
    pub fn new(project_root: &Path, args: BuildArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Load `.blocksmith/build.yml` and apply command-line overrides.
    ///
    /// A missing config file is fine when `--dirs` is given.
    fn config(&self) -> Result<BuildConfig> {
        let mut config = match load_build_config(&self.project_root) {
            Ok(config) => config,
            Err(BlocksmithError::ConfigNotFound { .. }) if !self.args.dirs.is_empty() => {
                BuildConfig::default()
            }
            Err(e) => return Err(e),
        };

        if !self.args.dirs.is_empty() {
            config.dirs = self.args.dirs.clone();
        }
        if let Some(output) = &self.args.output {
            config.output_dir = Some(output.clone());
        }
        if self.args.allow_subdirectories {
            config.allow_subdirectories = true;
        }

        validate_build(&config)?;
        Ok(config)
    }
}

impl Command for BuildCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match self.config() {
            Ok(c) => c,
            Err(BlocksmithError::ConfigNotFound { path }) => {
                ui.error(&format!("No build configuration at {}", path.display()));
                ui.hint("Create it with a `dirs:` list or pass --dirs");
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let languages = LanguageRegistry::default();
        let ignore = IgnoreRules::load(&self.project_root, &config.ignore);
        let mut diagnostics = Diagnostics::new();

        let mut spinner = ui.start_spinner("Building blocks...");
        let built = BlockGraphBuilder::new(&self.project_root, &config, &languages, &ignore)
            .build_all(&mut diagnostics);
        let categories = match built {
            Ok(categories) => prune(categories),
            Err(e) => {
                spinner.finish_error("Build failed");
                return Err(e);
            }
        };
        let manifest = Manifest::new(categories);
        let block_count = manifest.blocks().count();
        spinner.finish_success(&format!(
            "Built {} blocks in {} categories",
            block_count,
            manifest.categories.len()
        ));

        for diagnostic in diagnostics.iter() {
            ui.warning(&format!("{}: {}", diagnostic.path.display(), diagnostic.message));
            if let Some(hint) = &diagnostic.hint {
                ui.hint(hint);
            }
        }

        if ui.output_mode().shows_detail() {
            for block in manifest.blocks() {
                let kind = if block.subdirectory { "dir" } else { "file" };
                let listed = if block.list { "" } else { " (unlisted)" };
                ui.message(&format!("  {} [{}]{}", block.specifier(), kind, listed));
            }
        }

        let path = manifest.write_to(&self.project_root.join(config.output_dir()))?;
        ui.success(&format!("Wrote {}", path.display()));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::MANIFEST_FILE;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    fn registry(build_yml: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/ui/card")).unwrap();
        fs::write(
            temp.path().join("src/ui/button.ts"),
            "import { Icon } from './icon';\nexport const Button = Icon;\n",
        )
        .unwrap();
        fs::write(temp.path().join("src/ui/icon.ts"), "export const Icon = 1;\n").unwrap();
        fs::write(temp.path().join("src/ui/card/index.ts"), "export {};\n").unwrap();
        if let Some(yml) = build_yml {
            fs::create_dir_all(temp.path().join(".blocksmith")).unwrap();
            fs::write(temp.path().join(".blocksmith/build.yml"), yml).unwrap();
        }
        temp
    }

    fn read_manifest(dir: &Path) -> Manifest {
        let content = fs::read_to_string(dir.join(MANIFEST_FILE)).unwrap();
        Manifest::from_json(&content, "test").unwrap()
    }

    #[test]
    fn builds_from_config() {
        let temp = registry(Some("dirs: [src]\n"));
        let mut ui = MockUI::new();

        let result = BuildCommand::new(temp.path(), BuildArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        let manifest = read_manifest(temp.path());
        let button = manifest.blocks().find(|b| b.name == "button").unwrap();
        assert!(button.local_dependencies.contains("ui/icon"));
        assert!(ui.has_success(MANIFEST_FILE));
    }

    #[test]
    fn warns_about_disallowed_subdirectory_with_hint() {
        let temp = registry(Some("dirs: [src]\n"));
        let mut ui = MockUI::new();

        BuildCommand::new(temp.path(), BuildArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_warning("ui/card"));
        assert!(ui.has_hint("allowSubdirectories"));
        assert!(!read_manifest(temp.path()).blocks().any(|b| b.name == "card"));
    }

    #[test]
    fn flags_override_config() {
        let temp = registry(None);
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        let args = BuildArgs {
            dirs: vec!["src".into()],
            output: Some("dist".into()),
            allow_subdirectories: true,
        };

        BuildCommand::new(temp.path(), args).execute(&mut ui).unwrap();

        let manifest = read_manifest(&temp.path().join("dist"));
        assert!(manifest.blocks().any(|b| b.name == "card" && b.subdirectory));
        assert!(ui.has_message("ui/card [dir]"));
    }

    #[test]
    fn exclusion_wins_over_inclusion() {
        let temp = registry(Some(
            "dirs: [src]\nincludeBlocks: [button, icon]\nexcludeBlocks: [icon]\n",
        ));
        let mut ui = MockUI::new();

        let result = BuildCommand::new(temp.path(), BuildArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        let names: Vec<_> = read_manifest(temp.path())
            .blocks()
            .map(|b| b.name.clone())
            .collect();
        assert_eq!(names, vec!["button"]);
    }

    #[test]
    fn missing_config_fails_with_hint() {
        let temp = registry(None);
        let mut ui = MockUI::new();

        let result = BuildCommand::new(temp.path(), BuildArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("No build configuration"));
        assert!(ui.has_hint("--dirs"));
    }

    #[test]
    fn unreadable_root_is_fatal() {
        let temp = registry(Some("dirs: [missing]\n"));
        let mut ui = MockUI::new();

        let result = BuildCommand::new(temp.path(), BuildArgs::default()).execute(&mut ui);
        assert!(matches!(result, Err(BlocksmithError::IoUnavailable { .. })));
        assert!(!temp.path().join(MANIFEST_FILE).exists());
    }
}
