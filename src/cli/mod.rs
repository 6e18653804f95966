//! Command-line interface
//!
//! Argument definitions, the output formatter, and one handler per command.

mod commands;
pub mod handlers;
mod output;

pub use commands::{Cli, Commands, ConfigCommands};
pub use output::OutputFormatter;
