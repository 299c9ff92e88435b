//! Configuration management for relayance.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::seed::{BundledSeed, ClientSource, SeedFile};
use crate::validation::DEFAULT_EMAIL_PATTERN;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "relayance";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "RELAYANCE_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `RELAYANCE_`, sections separated
///    by `__`, e.g. `RELAYANCE_VALIDATION__REQUIRE_NAME=false`)
/// 2. TOML config file at `~/.config/relayance/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed data configuration.
    pub seed: SeedConfig,
    /// Input validation configuration.
    pub validation: ValidationConfig,
}

/// Where the initial client list comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Path to a JSON seed file.
    /// Defaults to the seed data bundled with the binary.
    pub path: Option<PathBuf>,
}

/// Rules applied to user input before it reaches the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Enable input validation.
    pub enabled: bool,
    /// Regex an email address must match.
    pub email_pattern: String,
    /// Reject blank names.
    pub require_name: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            email_pattern: DEFAULT_EMAIL_PATTERN.to_string(),
            require_name: true,
        }
    }
}

impl Config {
    /// Load configuration from the defaults, the config file and the
    /// environment. `None` reads the file at [`default_config_path`].
    ///
    /// [`default_config_path`]: Self::default_config_path
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if regex::Regex::new(&self.validation.email_pattern).is_err() {
            return Err(Error::ConfigValidation {
                message: format!(
                    "invalid email_pattern regex: {}",
                    self.validation.email_pattern
                ),
            });
        }

        if let Some(path) = &self.seed.path {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "seed.path cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// The source the repository is populated from at startup.
    #[must_use]
    pub fn seed_source(&self) -> Box<dyn ClientSource> {
        match &self.seed.path {
            Some(path) => Box::new(SeedFile::new(path)),
            None => Box::new(BundledSeed),
        }
    }
}
