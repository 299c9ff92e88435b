//! Command-line interface for relayance.
//!
//! This is the presentation layer: it parses commands, validates user input and
//! renders the repository's contents. The `relayance` binary is a thin wrapper
//! around it.

mod commands;
mod render;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ClientCommand, ConfigCommand, ListCommand, OutputFormat, ShellCommand, ShellLine,
};
pub use render::{ClientView, NEW_BADGE};
pub use session::{split_words, Session, PROMPT};

use crate::logging::Verbosity;

/// relayance - Keep track of your clients
///
/// Lists, adds and deletes client records. The list starts from seed data and
/// lives in memory for the duration of one run; use `shell` to issue several
/// commands against the same list.
#[derive(Debug, Parser)]
#[command(name = "relayance")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to a JSON seed file (overrides configuration)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Client list commands
    #[command(flatten)]
    Client(ClientCommand),

    /// Start an interactive session over one client list
    Shell,

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
