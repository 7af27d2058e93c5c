//! CLI argument definitions using clap
//!
//! Commands:
//! - trivia init --config <path> [--seed]
//! - trivia seed --config <path>
//! - trivia serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trivia - REST backend for a trivia game
#[derive(Parser, Debug)]
#[command(name = "trivia")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database and its tables
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./trivia.json")]
        config: PathBuf,

        /// Also load the sample categories and questions
        #[arg(long)]
        seed: bool,
    },

    /// Load sample categories and questions into an empty database
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./trivia.json")]
        config: PathBuf,
    },

    /// Start the HTTP API server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./trivia.json")]
        config: PathBuf,

        /// Port to listen on (overrides the configured port)
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
