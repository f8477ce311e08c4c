use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::cli::core::CommandError;
use crate::cli::output;
use crate::cli::test_mode;
use crate::cli::validate;

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    loop {
        match test_mode::next_text_input(prompt)? {
            Some(answer) if answer.trim().is_empty() => return Ok(default),
            Some(answer) => match validate::parse_yes_no(&answer) {
                Ok(value) => return Ok(value),
                Err(message) => print_warning(message),
            },
            None => {
                return Confirm::with_theme(theme)
                    .with_prompt(prompt)
                    .default(default)
                    .interact()
                    .map_err(CommandError::from)
            }
        }
    }
}

/// Prompt the user for free-form text input. Empty answers are allowed.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, CommandError> {
    if let Some(scripted) = test_mode::next_text_input(prompt)? {
        return Ok(scripted);
    }
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(CommandError::from)
}
