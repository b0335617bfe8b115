//! Add command implementation.
//!
//! The `blocksmith add` command installs blocks and the blocks they depend
//! on. Dependencies that are already installed are left alone; requested
//! blocks that are already installed are overwritten only after
//! confirmation.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::cli::args::AddArgs;
use crate::error::Result;
use crate::registry::{get_installed, planned_files, resolve_tree, InstallingBlock, Installer};
use crate::ui::UserInterface;

use super::context::ProjectContext;
use super::dispatcher::{Command, CommandResult};

/// The add command implementation.
pub struct AddCommand {
    project_root: PathBuf,
    args: AddArgs,
}

impl AddCommand {
    /// Create a new add command.
    pub fn new(project_root: &Path, args: AddArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn describe(item: &InstallingBlock) -> String {
        if item.sub_dependency {
            format!("{} (dependency)", item.specifier)
        } else {
            item.specifier.clone()
        }
    }
}

impl Command for AddCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(ctx) = ProjectContext::load(&self.project_root, ui)? else {
            return Ok(CommandResult::failure(2));
        };

        let mut spinner = ui.start_spinner("Fetching registries...");
        let known = match ctx.fetch_known(&self.args.blocks) {
            Ok(known) => known,
            Err(e) => {
                spinner.finish_error("Could not fetch registries");
                return Err(e);
            }
        };
        spinner.finish_success(&format!("Fetched {} blocks", known.len()));

        let installed: HashSet<String> = get_installed(&known, &ctx.config, &self.project_root)?
            .into_iter()
            .map(|b| b.specifier)
            .collect();

        let plan = resolve_tree(
            &self.args.blocks,
            &known,
            &ctx.registries,
            &ctx.providers,
            &installed,
        )?;

        if self.args.dry_run {
            ui.message("Would install:");
            for item in &plan {
                ui.message(&format!("  {}", Self::describe(item)));
                for file in planned_files(&item.block, &ctx.config)? {
                    ui.message(&format!("    {}", file.target.display()));
                }
            }
            return Ok(CommandResult::success());
        }

        let installer = Installer::new(&ctx.providers, &ctx.config, &self.project_root);
        let mut dependencies = BTreeSet::new();
        let mut dev_dependencies = BTreeSet::new();
        let mut count = 0;

        for item in &plan {
            if installed.contains(&item.specifier) && !self.args.yes {
                let question = format!("{} is already installed. Overwrite it?", item.specifier);
                if !ui.confirm("overwrite", &question, false)? {
                    ui.warning(&format!("Skipped {}", item.specifier));
                    continue;
                }
            }

            let written = installer.install(item)?;
            if ui.output_mode().shows_detail() {
                for path in &written {
                    ui.message(&format!("  wrote {}", path.display()));
                }
            }
            ui.success(&format!("Added {}", Self::describe(item)));
            dependencies.extend(item.block.dependencies.iter().cloned());
            dev_dependencies.extend(item.block.dev_dependencies.iter().cloned());
            count += 1;
        }

        if !dependencies.is_empty() {
            let list: Vec<_> = dependencies.into_iter().collect();
            ui.message(&format!("Packages needed: {}", list.join(" ")));
        }
        if !dev_dependencies.is_empty() {
            let list: Vec<_> = dev_dependencies.into_iter().collect();
            ui.message(&format!("Dev packages needed: {}", list.join(" ")));
        }
        tracing::info!("Installed {} of {} planned blocks", count, plan.len());

        Ok(CommandResult::success())
    }
}
