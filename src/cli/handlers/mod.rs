//! Command handlers
//!
//! Each handler loads what it needs from a [`HandlerContext`], performs one
//! command and reports through the [`OutputFormatter`](crate::cli::OutputFormatter).

mod common;
mod config;
mod fee;
#[cfg(feature = "api")]
mod serve;
mod ticket;

pub use common::{HandlerContext, build_manager};
pub use config::handle_config_show;
pub use fee::handle_fee_command;
#[cfg(feature = "api")]
pub use serve::handle_serve_command;
pub use ticket::{handle_entry_command, handle_exit_command, handle_quote_command};
