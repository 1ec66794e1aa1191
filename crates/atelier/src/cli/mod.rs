//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the atelier binary.

mod commands;
mod handlers;
mod session;

pub use commands::{Cli, Commands};
pub use handlers::run_command;
