//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Commands that read or change the client list.
///
/// Shared by the one-shot CLI and the interactive shell.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ClientCommand {
    /// List clients in display order
    List(ListCommand),

    /// Show one client in detail
    Show {
        /// Email of the client (case-insensitive)
        email: String,
    },

    /// Add a new client, stamped with the current date
    Add {
        /// Client name
        name: String,
        /// Client email (must not already exist, ignoring case)
        email: String,
    },

    /// Delete a client
    Delete {
        /// Email of the client (case-insensitive)
        email: String,
    },

    /// Show a summary of the client list
    Stats {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// List command arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Args)]
pub struct ListCommand {
    /// Only show clients created today
    #[arg(short, long)]
    pub new_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// One line of input in the interactive shell.
#[derive(Debug, Parser)]
#[command(multicall = true)]
pub struct ShellLine {
    /// The command on this line
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands available inside the interactive shell.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Client list commands
    #[command(flatten)]
    Client(ClientCommand),

    /// Discard changes and reload the seed data
    Reload,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One client per line
    #[default]
    Plain,
    /// Aligned columns
    Table,
    /// JSON array
    Json,
}
