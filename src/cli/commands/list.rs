//! List command implementation.
//!
//! The `blocksmith list` command shows the blocks each configured registry
//! offers, marking the ones already installed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::registry::get_installed;
use crate::ui::theme::BlocksmithTheme;
use crate::ui::UserInterface;

use super::context::ProjectContext;
use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(ctx) = ProjectContext::load(&self.project_root, ui)? else {
            return Ok(CommandResult::failure(2));
        };
        if ctx.registries.is_empty() {
            ui.warning("No registries configured");
            return Ok(CommandResult::success());
        }

        let known = ctx.fetch_known(&[])?;
        let installed: HashSet<String> = get_installed(&known, &ctx.config, &self.project_root)?
            .into_iter()
            .map(|b| b.specifier)
            .collect();

        let theme = BlocksmithTheme::detect();
        for state in &ctx.registries {
            ui.message(&format!("{}", theme.highlight.apply_to(&state.url)));

            let blocks = known
                .iter()
                .filter(|(_, b)| b.registry_url == state.url)
                .filter(|(_, b)| self.args.all || b.list);
            for (specifier, block) in blocks {
                let mut line = format!("  {}", block.specifier());
                if !block.list {
                    line.push_str(&format!(" {}", theme.dim.apply_to("(unlisted)")));
                }
                if installed.contains(specifier) {
                    line.push_str(&format!(" {}", theme.success.apply_to("installed")));
                }
                ui.message(&line);
            }
        }

        Ok(CommandResult::success())
    }
}
