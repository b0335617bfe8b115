//! Schema command implementation.
//!
//! The `blocksmith schema` command prints the manifest's JSON Schema so
//! editors and other tooling can validate `blocksmith-manifest.json`.

use crate::error::Result;
use crate::manifest::Manifest;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

impl SchemaCommand {
    /// The pretty-printed schema.
    pub fn render() -> Result<String> {
        Ok(serde_json::to_string_pretty(&Manifest::json_schema()).map_err(anyhow::Error::from)?)
    }
}

impl Command for SchemaCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // Printed directly so quiet mode can't swallow it.
        println!("{}", Self::render()?);
        Ok(CommandResult::success())
    }
}
