//! `relayance` - A small single-user client record manager
//!
//! This library provides the client record model, an in-memory repository that
//! keeps clients unique by email, seed-data loading, and the command-line
//! presentation layer built on top of them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod repository;
pub mod seed;
pub mod temporal;
pub mod validation;

pub use client::{ClientRecord, CreationDate};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use repository::{ClientRepository, RepositoryStats};
pub use seed::{BundledSeed, ClientSource, SeedFile, SeedText};
pub use validation::InputValidator;
