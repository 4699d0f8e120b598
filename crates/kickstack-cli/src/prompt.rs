use dialoguer::{Confirm, Select};
use kickstack_core::external::Prompter;
use kickstack_core::{KickstackError, Result};

const NON_INTERACTIVE_HINT: &str = "pass --variant, --router/--no-router and --dev/--no-dev to skip prompts";

/// Terminal prompts backed by dialoguer.
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, choices: &[&str], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(choices)
            .default(default)
            .interact()
            .map_err(|e| {
                KickstackError::UserInput(format!(
                    "failed to read selection ({e}); {NON_INTERACTIVE_HINT}"
                ))
            })
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| {
                KickstackError::UserInput(format!(
                    "failed to read answer ({e}); {NON_INTERACTIVE_HINT}"
                ))
            })
    }
}
