//! The client record value type.
//!
//! A [`ClientRecord`] keeps its creation date exactly as received and derives
//! the parsed date on every access. Records are never mutated once built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::temporal;

/// A client: name, email and the raw creation-date text.
///
/// Equality and hashing cover all three fields, so two records loaded from the
/// same seed entry compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(rename = "nom")]
    name: String,

    email: String,

    #[serde(rename = "date_creation")]
    creation_date_raw: String,
}

/// Outcome of parsing a record's raw creation date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationDate {
    /// The raw text parsed into a real instant.
    Parsed(DateTime<Utc>),
    /// Nothing could be parsed; callers substitute "now" for display.
    Fallback {
        /// The unparseable text.
        raw: String,
    },
}

impl CreationDate {
    /// Whether parsing failed.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// The parsed instant, if there is one.
    #[must_use]
    pub fn parsed(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Parsed(date) => Some(*date),
            Self::Fallback { .. } => None,
        }
    }

    /// The parsed instant, or the clock's current instant on fallback.
    #[must_use]
    pub fn resolve(&self, clock: &impl Clock) -> DateTime<Utc> {
        self.parsed().unwrap_or_else(|| clock.now())
    }
}

impl ClientRecord {
    /// Build a record from already-known values, such as a seed entry.
    ///
    /// No validation is applied to any field.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        creation_date_raw: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            creation_date_raw: creation_date_raw.into(),
        }
    }

    /// Create a new client stamped with the current instant.
    ///
    /// # Examples
    ///
    /// ```
    /// use relayance::ClientRecord;
    ///
    /// let client = ClientRecord::create("Martin", "martin@example.com");
    /// assert!(client.is_created_today());
    /// assert!(client.creation_date_raw().ends_with('Z'));
    /// ```
    #[must_use]
    pub fn create(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::create_at(name, email, &SystemClock)
    }

    /// Create a new client stamped with `clock`'s current instant.
    #[must_use]
    pub fn create_at(name: impl Into<String>, email: impl Into<String>, clock: &impl Clock) -> Self {
        Self::new(name, email, temporal::stamp(&clock.now()))
    }

    /// The client's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The client's email address, as entered.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The creation date exactly as stored.
    #[must_use]
    pub fn creation_date_raw(&self) -> &str {
        &self.creation_date_raw
    }

    /// Parse the stored creation date without substituting anything.
    #[must_use]
    pub fn parsed_creation_date(&self) -> CreationDate {
        temporal::parse(&self.creation_date_raw).map_or_else(
            || CreationDate::Fallback {
                raw: self.creation_date_raw.clone(),
            },
            CreationDate::Parsed,
        )
    }

    /// The creation date, or the current instant when the stored text is
    /// unparseable. Not cached.
    #[must_use]
    pub fn creation_date(&self) -> DateTime<Utc> {
        self.creation_date_at(&SystemClock)
    }

    /// Like [`creation_date`](Self::creation_date), reading "now" from `clock`.
    #[must_use]
    pub fn creation_date_at(&self, clock: &impl Clock) -> DateTime<Utc> {
        self.parsed_creation_date().resolve(clock)
    }

    /// Whether the client was created on today's local calendar day.
    ///
    /// Records with an unparseable date always count as created today.
    #[must_use]
    pub fn is_created_today(&self) -> bool {
        self.is_created_today_at(&SystemClock)
    }

    /// Like [`is_created_today`](Self::is_created_today), reading "now" from `clock`.
    #[must_use]
    pub fn is_created_today_at(&self, clock: &impl Clock) -> bool {
        temporal::is_local_day(&self.creation_date_at(clock), clock.today())
    }

    /// Whether `email` matches this client's email, ignoring case.
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }

    /// Whether any record in `records` shares this client's email, ignoring case.
    #[must_use]
    pub fn exists_in(&self, records: &[ClientRecord]) -> bool {
        records.iter().any(|other| other.has_email(&self.email))
    }

    /// The creation date as `DD-MM-YYYY`.
    #[must_use]
    pub fn formatted_creation_date(&self) -> String {
        self.formatted_creation_date_at(&SystemClock)
    }

    /// Like [`formatted_creation_date`](Self::formatted_creation_date), reading
    /// "now" from `clock`.
    #[must_use]
    pub fn formatted_creation_date_at(&self, clock: &impl Clock) -> String {
        self.formatted_creation_date_with(clock, |date| Some(temporal::format(date)))
    }

    /// Format the creation date with `formatter`, falling back to the stored
    /// text when it returns `None`.
    #[must_use]
    pub fn formatted_creation_date_with<F>(&self, clock: &impl Clock, formatter: F) -> String
    where
        F: FnOnce(&DateTime<Utc>) -> Option<String>,
    {
        formatter(&self.creation_date_at(clock)).unwrap_or_else(|| self.creation_date_raw.clone())
    }
}

impl std::fmt::Display for ClientRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
