//! Error types for relayance.
//!
//! This module defines all error types used throughout the relayance crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for relayance operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Repository Errors ===
    /// A client with the same email (compared case-insensitively) already exists.
    #[error("a client with email '{email}' already exists")]
    DuplicateEmail {
        /// The rejected email address.
        email: String,
    },

    /// No client matches the given email.
    #[error("no client with email '{email}'")]
    ClientNotFound {
        /// The email that was looked up.
        email: String,
    },

    // === Seed Errors ===
    /// Failed to read a seed file.
    #[error("failed to read seed data at {path}: {source}")]
    SeedRead {
        /// Path to the seed file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Seed data is not a valid JSON array of clients.
    #[error("malformed seed data: {0}")]
    SeedDecode(#[from] serde_json::Error),

    // === Input Errors ===
    /// User input was rejected by the presentation layer.
    #[error("invalid {field} '{value}': {reason}")]
    InvalidInput {
        /// Which field was rejected.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for relayance operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a duplicate email error.
    #[must_use]
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    /// Create a not-found error for an email lookup.
    #[must_use]
    pub fn client_not_found(email: impl Into<String>) -> Self {
        Self::ClientNotFound {
            email: email.into(),
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error reports a duplicate client.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateEmail { .. })
    }

    /// Check if this error comes from bad seed data.
    #[must_use]
    pub fn is_seed_error(&self) -> bool {
        matches!(self, Self::SeedRead { .. } | Self::SeedDecode(_))
    }
}
