use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

use crate::error::{ConsoleError, Result};

/// Operator interaction needed by commands
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question; `false` on decline
    fn confirm(&self, prompt: &str) -> Result<bool>;
    /// Read one line of text, pre-filled with `default` when given
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;
}

/// Terminal prompts
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| ConsoleError::Input(e.to_string()))
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input
            .interact_text()
            .map_err(|e| ConsoleError::Input(e.to_string()))
    }
}
