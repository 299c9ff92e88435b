//! `relayance` - CLI for the client record manager
//!
//! This binary loads the seed data into one repository and runs a single
//! command, or an interactive shell, against it.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;

use relayance::cli::{Cli, Command, ConfigCommand, Session};
use relayance::{init_logging, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    if let Some(seed) = cli.seed.clone() {
        config.seed.path = Some(seed);
    }

    // Execute the command
    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        Command::Client(client_cmd) => {
            let mut session = open_session(&config)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            session.execute(&client_cmd, &mut out)?;
            out.flush()?;
            Ok(())
        }
        Command::Shell => {
            let mut session = open_session(&config)?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            session.run_shell(stdin.lock(), &mut stdout.lock())?;
            Ok(())
        }
    }
}

fn open_session(config: &Config) -> anyhow::Result<Session> {
    let source = config.seed_source();
    Session::open(config).with_context(|| format!("loading clients from {}", source.name()))
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Seed]");
                match &config.seed.path {
                    Some(path) => println!("  Path:             {}", path.display()),
                    None => println!("  Path:             (bundled)"),
                }
                println!();
                println!("[Validation]");
                println!("  Enabled:          {}", config.validation.enabled);
                println!("  Email pattern:    {}", config.validation.email_pattern);
                println!("  Require name:     {}", config.validation.require_name);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
