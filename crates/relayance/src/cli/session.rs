//! A presentation session over one repository.
//!
//! The binary builds a single [`Session`] at startup and routes every command
//! through it, so the one-shot CLI and the interactive shell see the same list.

use std::io::{BufRead, Write};

use clap::Parser;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::repository::ClientRepository;
use crate::seed::ClientSource;
use crate::validation::InputValidator;

use super::commands::{ClientCommand, ListCommand, ShellCommand, ShellLine};
use super::render::{self, ClientView};

/// Prompt printed before each shell line.
pub const PROMPT: &str = "relayance> ";

/// Owns the repository and the input rules for one run of the program.
pub struct Session<C: Clock = SystemClock> {
    repo: ClientRepository<C>,
    validator: InputValidator,
    source: Box<dyn ClientSource>,
}

impl<C: Clock> std::fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("clients", &self.repo.len())
            .field("source", &self.source.name())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Build a session from configuration and load its seed data.
    ///
    /// # Errors
    ///
    /// Returns an error if the validation rules are invalid or the seed data
    /// cannot be loaded.
    pub fn open(config: &Config) -> Result<Self> {
        let validator = InputValidator::from_config(&config.validation)?;
        Self::start(ClientRepository::new(), validator, config.seed_source())
    }
}

impl<C: Clock> Session<C> {
    /// Build a session around `repo` and populate it from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` cannot be loaded.
    pub fn start(
        mut repo: ClientRepository<C>,
        validator: InputValidator,
        source: Box<dyn ClientSource>,
    ) -> Result<Self> {
        repo.load(source.as_ref())?;
        Ok(Self {
            repo,
            validator,
            source,
        })
    }

    /// The repository behind this session.
    #[must_use]
    pub fn repository(&self) -> &ClientRepository<C> {
        &self.repo
    }

    /// Run one client command, writing its output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error for rejected input, duplicate or unknown clients, and
    /// failed writes.
    pub fn execute(&mut self, command: &ClientCommand, out: &mut impl Write) -> Result<()> {
        match command {
            ClientCommand::List(list) => self.list(list, out),
            ClientCommand::Show { email } => {
                let client = self
                    .repo
                    .find_by_email(email)
                    .ok_or_else(|| Error::client_not_found(email.as_str()))?;
                render::write_detail(out, &ClientView::new(&self.repo, client))
            }
            ClientCommand::Add { name, email } => {
                self.validator.validate(name, email)?;
                let added = self.repo.add(name.as_str(), email.as_str())?;
                writeln!(out, "Added {added}")?;
                Ok(())
            }
            ClientCommand::Delete { email } => {
                let removed = self
                    .repo
                    .delete_by_email(email)
                    .ok_or_else(|| Error::client_not_found(email.as_str()))?;
                writeln!(out, "Deleted {removed}")?;
                Ok(())
            }
            ClientCommand::Stats { json } => render::write_stats(out, &self.repo.stats(), *json),
        }
    }

    fn list(&self, list: &ListCommand, out: &mut impl Write) -> Result<()> {
        let views: Vec<ClientView<'_>> = self
            .repo
            .iter()
            .filter(|client| !list.new_only || self.repo.is_new(client))
            .map(|client| ClientView::new(&self.repo, client))
            .collect();
        render::write_list(out, &views, list.format)
    }

    /// Discard in-memory changes and load the seed data again.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed data cannot be loaded; the current list
    /// is kept in that case.
    pub fn reload(&mut self) -> Result<usize> {
        self.repo.load(self.source.as_ref())
    }

    /// Read commands line by line from `input` until `quit` or end of input.
    ///
    /// Command errors are reported on `out` and do not end the session.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run_shell(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        info!("Starting shell with {} clients", self.repo.len());
        write!(out, "{PROMPT}")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            let words = match split_words(&line) {
                Ok(words) => words,
                Err(e) => {
                    writeln!(out, "error: {e}")?;
                    write!(out, "{PROMPT}")?;
                    out.flush()?;
                    continue;
                }
            };

            if !words.is_empty() {
                debug!("Shell command: {:?}", words);
                match ShellLine::try_parse_from(&words) {
                    Ok(ShellLine {
                        command: ShellCommand::Quit,
                    }) => return Ok(()),
                    Ok(ShellLine {
                        command: ShellCommand::Reload,
                    }) => match self.reload() {
                        Ok(count) => writeln!(out, "Reloaded {count} clients")?,
                        Err(e) => writeln!(out, "error: {e}")?,
                    },
                    Ok(ShellLine {
                        command: ShellCommand::Client(command),
                    }) => {
                        if let Err(e) = self.execute(&command, out) {
                            if matches!(e, Error::Io(_)) {
                                return Err(e);
                            }
                            writeln!(out, "error: {e}")?;
                        }
                    }
                    Err(e) => write!(out, "{}", e.render())?,
                }
            }

            write!(out, "{PROMPT}")?;
            out.flush()?;
        }

        writeln!(out)?;
        Ok(())
    }
}

/// Split a shell line into words, honouring single and double quotes.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if a quote is left open.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(Error::invalid_input("command", line, "unterminated quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
