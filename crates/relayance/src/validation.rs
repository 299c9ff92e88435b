//! Input validation for the presentation layer.
//!
//! The model and repository accept any name and email. Format rules are applied
//! here, before user input reaches [`ClientRepository::add`], and only there.
//!
//! [`ClientRepository::add`]: crate::repository::ClientRepository::add

use regex::Regex;
use tracing::trace;

use crate::config::ValidationConfig;
use crate::error::{Error, Result};

/// Default pattern for acceptable email addresses.
pub const DEFAULT_EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$";

/// Validates user-entered client fields.
#[derive(Debug, Clone)]
pub struct InputValidator {
    enabled: bool,
    email: Regex,
    require_name: bool,
}

impl InputValidator {
    /// Build a validator from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] if the email pattern is not a valid regex.
    pub fn from_config(config: &ValidationConfig) -> Result<Self> {
        let email = Regex::new(&config.email_pattern).map_err(|e| Error::ConfigValidation {
            message: format!("invalid email pattern '{}': {e}", config.email_pattern),
        })?;

        Ok(Self {
            enabled: config.enabled,
            email,
            require_name: config.require_name,
        })
    }

    /// Check an email address against the configured pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the address does not match.
    pub fn validate_email(&self, email: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        trace!("Validating email '{}'", email);

        if email.trim().is_empty() {
            return Err(Error::invalid_input("email", email, "email cannot be empty"));
        }
        if !email.contains('@') {
            return Err(Error::invalid_input("email", email, "missing '@'"));
        }
        if !self.email.is_match(email) {
            return Err(Error::invalid_input(
                "email",
                email,
                "does not look like an email address",
            ));
        }
        Ok(())
    }

    /// Check a client name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a name is required and `name` is blank.
    pub fn validate_name(&self, name: &str) -> Result<()> {
        if self.enabled && self.require_name && name.trim().is_empty() {
            return Err(Error::invalid_input("name", name, "name cannot be empty"));
        }
        Ok(())
    }

    /// Check both fields of a new client.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self, name: &str, email: &str) -> Result<()> {
        self.validate_name(name)?;
        self.validate_email(email)
    }
}
