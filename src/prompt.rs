//! Operator input abstraction.
//!
//! The release workflow gathers tags, titles, and bodies from a human.
//! That capability sits behind the [`Prompt`] trait so tests can drive
//! the workflow with a mock instead of a terminal.
use log::*;
use regex::Regex;
use std::{
    env,
    io::{self, BufRead, Write},
    process::Command,
};

#[cfg(test)]
use mockall::automock;

use crate::{error::RoundupError, result::Result};

/// Editor used for multi-line composition when `EDITOR` is unset.
pub const DEFAULT_EDITOR: &str = "vim";

/// Source of interactive operator input.
///
/// Both methods block until the operator confirms a value or abandons
/// the entry. Abandonment (empty input) surfaces as
/// [`RoundupError::InputAbandoned`] and aborts the run.
#[cfg_attr(test, automock)]
pub trait Prompt: Send + Sync {
    /// Read a single line, optionally re-prompting until it matches
    /// `pattern`, then ask for y/n confirmation.
    fn input<'a>(
        &self,
        prompt: &str,
        label: &str,
        pattern: Option<&'a Regex>,
    ) -> Result<String>;

    /// Compose multi-line text in the operator's editor, seeded with
    /// `seed`, then ask for y/n confirmation.
    fn edit(&self, seed: &str, label: &str) -> Result<String>;
}

/// Interactive terminal implementation of [`Prompt`].
pub struct TerminalPrompt;

impl TerminalPrompt {
    fn read_line(prompt: &str) -> Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;

        Ok(line.trim().to_string())
    }

    /// Loop until the operator answers y or n.
    fn confirm(message: &str) -> Result<bool> {
        loop {
            let answer = Self::read_line(message)?;

            match answer.to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => continue,
            }
        }
    }
}

impl Prompt for TerminalPrompt {
    fn input<'a>(
        &self,
        prompt: &str,
        label: &str,
        pattern: Option<&'a Regex>,
    ) -> Result<String> {
        loop {
            let val = Self::read_line(prompt)?;

            if val.is_empty() {
                return Err(
                    RoundupError::InputAbandoned(label.to_string()).into()
                );
            }

            if let Some(re) = pattern
                && !re.is_match(&val)
            {
                warn!("invalid format: try to match pattern: {}", re.as_str());
                continue;
            }

            let message =
                format!("You typed: {val}. Are you sure? [y/n]: ");

            if Self::confirm(&message)? {
                return Ok(val);
            }
        }
    }

    fn edit(&self, seed: &str, label: &str) -> Result<String> {
        // editors on some platforms choke on carriage returns in the seed
        let seed = seed.replace('\r', "");
        let editor =
            env::var("EDITOR").unwrap_or_else(|_| DEFAULT_EDITOR.into());

        loop {
            let mut file =
                tempfile::Builder::new().suffix(".md").tempfile()?;
            file.write_all(seed.as_bytes())?;
            file.flush()?;

            let status = Command::new(&editor).arg(file.path()).status()?;

            if !status.success() {
                return Err(
                    RoundupError::EditorFailed(editor.clone()).into()
                );
            }

            let val = std::fs::read_to_string(file.path())?;

            if val.trim().is_empty() {
                return Err(
                    RoundupError::InputAbandoned(label.to_string()).into()
                );
            }

            let message = format!(
                "You typed:\n\n{val}\n\nAre you sure? [y/n]: "
            );

            if Self::confirm(&message)? {
                return Ok(val);
            }
        }
    }
}
