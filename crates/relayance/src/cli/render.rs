//! Text and JSON rendering of clients for the terminal.

use std::io::Write;

use serde::Serialize;

use crate::client::ClientRecord;
use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::repository::{ClientRepository, RepositoryStats};

use super::commands::OutputFormat;

/// Badge shown next to clients created today.
pub const NEW_BADGE: &str = "[new]";

/// A client as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientView<'a> {
    /// Client name.
    pub nom: &'a str,
    /// Client email.
    pub email: &'a str,
    /// Creation date as stored.
    pub date_creation: &'a str,
    /// Creation date as `DD-MM-YYYY`.
    pub created: String,
    /// Whether the client was created today.
    pub is_new: bool,
}

impl<'a> ClientView<'a> {
    /// Build the view of `client` as seen by `repo`.
    #[must_use]
    pub fn new<C: Clock>(repo: &ClientRepository<C>, client: &'a ClientRecord) -> Self {
        Self {
            nom: client.name(),
            email: client.email(),
            date_creation: client.creation_date_raw(),
            created: repo.format_date(client),
            is_new: repo.is_new(client),
        }
    }
}

/// Write a list of clients in the requested format.
///
/// # Errors
///
/// Returns an error if writing or JSON serialization fails.
pub fn write_list(out: &mut impl Write, views: &[ClientView<'_>], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            if views.is_empty() {
                writeln!(out, "No clients.")?;
            }
            for view in views {
                let badge = if view.is_new { NEW_BADGE } else { "" };
                let line = format!("{} <{}> {} {badge}", view.nom, view.email, view.created);
                writeln!(out, "{}", line.trim_end())?;
            }
        }
        OutputFormat::Table => write_table(out, views)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, views).map_err(|e| Error::Io(e.into()))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_table(out: &mut impl Write, views: &[ClientView<'_>]) -> Result<()> {
    let name_width = views
        .iter()
        .map(|v| v.nom.chars().count())
        .chain(std::iter::once("NAME".len()))
        .max()
        .unwrap_or_default();
    let email_width = views
        .iter()
        .map(|v| v.email.chars().count())
        .chain(std::iter::once("EMAIL".len()))
        .max()
        .unwrap_or_default();

    writeln!(out, "{:<name_width$}  {:<email_width$}  {:<10}  NEW", "NAME", "EMAIL", "CREATED")?;
    for view in views {
        writeln!(
            out,
            "{:<name_width$}  {:<email_width$}  {:<10}  {}",
            view.nom,
            view.email,
            view.created,
            if view.is_new { "yes" } else { "" }
        )?;
    }
    Ok(())
}

/// Write the detail view of one client.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_detail(out: &mut impl Write, view: &ClientView<'_>) -> Result<()> {
    if view.is_new {
        writeln!(out, "{NEW_BADGE} New client")?;
    }
    writeln!(out, "Name:    {}", view.nom)?;
    writeln!(out, "Email:   {}", view.email)?;
    writeln!(out, "Created: {}", view.created)?;
    Ok(())
}

/// Write repository statistics.
///
/// # Errors
///
/// Returns an error if writing or JSON serialization fails.
pub fn write_stats(out: &mut impl Write, stats: &RepositoryStats, json: bool) -> Result<()> {
    let fmt_date = |date: &Option<chrono::DateTime<chrono::Utc>>| {
        date.as_ref().map_or_else(|| "-".to_string(), crate::temporal::format)
    };

    if json {
        let value = serde_json::json!({
            "total": stats.total,
            "new_today": stats.new_today,
            "unparsed_dates": stats.unparsed_dates,
            "oldest": stats.oldest.map(|d| d.to_rfc3339()),
            "newest": stats.newest.map(|d| d.to_rfc3339()),
        });
        let text = serde_json::to_string_pretty(&value).map_err(|e| Error::Io(e.into()))?;
        writeln!(out, "{text}")?;
    } else {
        writeln!(out, "Clients:        {}", stats.total)?;
        writeln!(out, "New today:      {}", stats.new_today)?;
        writeln!(out, "Unparsed dates: {}", stats.unparsed_dates)?;
        writeln!(out, "Oldest:         {}", fmt_date(&stats.oldest))?;
        writeln!(out, "Newest:         {}", fmt_date(&stats.newest))?;
    }
    Ok(())
}
