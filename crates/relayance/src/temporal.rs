//! Date parsing and formatting for client creation dates.
//!
//! Creation dates arrive as text in one of a few conventions and are shown to
//! the user as `DD-MM-YYYY` in the local calendar.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Machine-readable stamp written by newly created records (always UTC).
pub const MACHINE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Bare calendar day, interpreted as local midnight.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Display format: day-month-year, zero padded.
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Parse a creation date.
///
/// Attempts, in order: the strict machine format in UTC, a bare `YYYY-MM-DD`
/// day, then any RFC 3339 internet date-time. Returns `None` when all fail.
///
/// # Examples
///
/// ```
/// use relayance::temporal;
///
/// let date = temporal::parse("2023-02-20").unwrap();
/// assert_eq!(temporal::format(&date), "20-02-2023");
/// assert!(temporal::parse("2023-02-20T09:15:00.000Z").is_some());
/// assert!(temporal::parse("date_invalide").is_none());
/// ```
#[must_use]
pub fn parse(text: &str) -> Option<DateTime<Utc>> {
    parse_machine(text)
        .or_else(|| parse_day(text))
        .or_else(|| parse_internet(text))
}

fn parse_machine(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, MACHINE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn parse_day(text: &str) -> Option<DateTime<Utc>> {
    let midnight = NaiveDate::parse_from_str(text, DAY_FORMAT)
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

fn parse_internet(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Render a date as `DD-MM-YYYY` in the local calendar.
#[must_use]
pub fn format(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format(DISPLAY_FORMAT)
        .to_string()
}

/// Render a date in the machine format used for new records.
#[must_use]
pub fn stamp(date: &DateTime<Utc>) -> String {
    date.format(MACHINE_FORMAT).to_string()
}

/// Day of month (1-31) in the local calendar.
#[must_use]
pub fn day_of(date: &DateTime<Utc>) -> u32 {
    date.with_timezone(&Local).day()
}

/// Month (1-12) in the local calendar.
#[must_use]
pub fn month_of(date: &DateTime<Utc>) -> u32 {
    date.with_timezone(&Local).month()
}

/// Year in the local calendar.
#[must_use]
pub fn year_of(date: &DateTime<Utc>) -> i32 {
    date.with_timezone(&Local).year()
}

/// Whether `date` falls on `day` in the local calendar.
#[must_use]
pub fn is_local_day(date: &DateTime<Utc>, day: NaiveDate) -> bool {
    year_of(date) == day.year() && month_of(date) == day.month() && day_of(date) == day.day()
}
