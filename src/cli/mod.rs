//! CLI module for the trivia server
//!
//! Provides command-line interface for:
//! - init: Create the database schema, optionally with sample data
//! - seed: Load sample data into an empty database
//! - serve: Run the HTTP API

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, seed, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
