//! Non-interactive UI for CI and piped output.

use std::collections::HashMap;

use crate::error::{BlocksmithError, Result};

use super::prompts::parse_answer;
use super::theme::BlocksmithTheme;
use super::{OutputMode, ProgressSpinner, SpinnerHandle, UserInterface};

const PROMPT_ENV_PREFIX: &str = "BLOCKSMITH_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `BLOCKSMITH_PROMPT_<KEY>` variables, falling
/// back to the question's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: BlocksmithTheme,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();
        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            theme: BlocksmithTheme::plain(),
            env_overrides: overrides,
        }
    }

    fn override_key(key: &str) -> String {
        format!(
            "{}{}",
            PROMPT_ENV_PREFIX,
            key.to_uppercase().replace(['-', '/', '.'], "_")
        )
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn hint(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_hint(msg));
    }

    fn confirm(&mut self, key: &str, _question: &str, default: bool) -> Result<bool> {
        let env_key = Self::override_key(key);
        match self.env_overrides.get(&env_key) {
            Some(value) => parse_answer(value).ok_or_else(|| BlocksmithError::ConfigValidationError {
                message: format!("{} must be yes or no, got '{}'", env_key, value),
            }),
            None => Ok(default),
        }
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::hidden())
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
