//! Terminal output
//!
//! Human-readable messages go through the colored helpers; `--json` switches
//! commands to printing a single JSON document on stdout instead.

use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

/// Formats command output as text or JSON
#[derive(Debug, Clone, Copy)]
pub struct OutputFormatter {
    json: bool,
    color: bool,
}

impl OutputFormatter {
    #[must_use]
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self {
            json,
            color: !no_color,
        }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.color {
            println!("{}", message.green());
        } else {
            println!("{message}");
        }
    }

    /// Print an informational line
    pub fn info(&self, message: &str) {
        println!("{message}");
    }

    /// Print a warning to stderr
    pub fn warning(&self, message: &str) {
        if self.color {
            eprintln!("{} {}", "warning:".yellow().bold(), message);
        } else {
            eprintln!("warning: {message}");
        }
    }

    /// Print an error to stderr
    pub fn error(&self, message: &str) {
        if self.color {
            eprintln!("{} {}", "error:".red().bold(), message);
        } else {
            eprintln!("error: {message}");
        }
    }

    /// Print a value as pretty JSON on stdout
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
