//! Seed data loading.
//!
//! Seed data is a JSON array of objects with the keys `nom`, `email` and
//! `date_creation`. A [`ClientSource`] produces the full list of records or
//! fails as a whole; it never yields a partial list.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::client::ClientRecord;
use crate::error::{Error, Result};

/// Seed data compiled into the binary.
pub const BUNDLED_SEED: &str = include_str!("../data/clients.json");

/// A provider of client records for [`ClientRepository::load`].
///
/// [`ClientRepository::load`]: crate::repository::ClientRepository::load
pub trait ClientSource {
    /// A short description of this source (for logging).
    fn name(&self) -> String;

    /// Produce every record in the source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or decoded.
    fn fetch(&self) -> Result<Vec<ClientRecord>>;
}

/// Decode a JSON seed array.
///
/// Entries whose `date_creation` cannot be parsed are still returned, since a
/// record always has a displayable date; they are logged at `warn`.
///
/// # Errors
///
/// Returns [`Error::SeedDecode`] if `json` is not an array of client objects.
pub fn decode(json: &str) -> Result<Vec<ClientRecord>> {
    let records: Vec<ClientRecord> = serde_json::from_str(json)?;

    for record in &records {
        if record.parsed_creation_date().is_fallback() {
            warn!(
                "Client {} has unparseable creation date '{}'",
                record.email(),
                record.creation_date_raw()
            );
        }
    }

    debug!("Decoded {} seed records", records.len());
    Ok(records)
}

/// The seed data bundled with the application.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSeed;

impl ClientSource for BundledSeed {
    fn name(&self) -> String {
        "bundled seed".to_string()
    }

    fn fetch(&self) -> Result<Vec<ClientRecord>> {
        decode(BUNDLED_SEED)
    }
}

/// Seed data read from a JSON file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFile {
    path: PathBuf,
}

impl SeedFile {
    /// Create a source reading from `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ClientSource for SeedFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<ClientRecord>> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| Error::SeedRead {
            path: self.path.clone(),
            source,
        })?;
        decode(&json)
    }
}

/// Seed data held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedText(
    /// The JSON seed array.
    pub String,
);

impl ClientSource for SeedText {
    fn name(&self) -> String {
        "inline seed".to_string()
    }

    fn fetch(&self) -> Result<Vec<ClientRecord>> {
        decode(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_CLIENTS: &str = r#"[
        {"nom": "Jean Dupont", "email": "jean@example.com", "date_creation": "2023-01-15T10:30:00.000Z"},
        {"nom": "Marie Martin", "email": "marie.martin@example.com", "date_creation": "2023-02-20T09:15:00.000Z"}
    ]"#;

    #[test]
    fn test_decode_empty_array() {
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_preserves_order() {
        let records = decode(TWO_CLIENTS).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), "Jean Dupont");
        assert_eq!(records[1].email(), "marie.martin@example.com");
        assert_eq!(records[1].creation_date_raw(), "2023-02-20T09:15:00.000Z");
    }

    #[test]
    fn test_decode_keeps_unparseable_dates() {
        let json = r#"[{"nom": "Tata", "email": "tata@email", "date_creation": "20:32 Wed, 30 Oct 2019"}]"#;
        let records = decode(json).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].parsed_creation_date().is_fallback());
    }

    #[test]
    fn test_decode_malformed() {
        let err = decode("{not json").unwrap_err();
        assert!(matches!(err, Error::SeedDecode(_)));
    }

    #[test]
    fn test_decode_missing_field() {
        let err = decode(r#"[{"nom": "Jean", "email": "jean@example.com"}]"#).unwrap_err();
        assert!(err.is_seed_error());
    }

    #[test]
    fn test_decode_not_an_array() {
        let err = decode(r#"{"nom": "Jean", "email": "j@x.com", "date_creation": "2023-01-01"}"#)
            .unwrap_err();
        assert!(matches!(err, Error::SeedDecode(_)));
    }

    #[test]
    fn test_bundled_seed_is_valid() {
        let records = BundledSeed.fetch().unwrap();

        assert!(!records.is_empty());
        for record in &records {
            assert!(!record.name().is_empty());
            assert!(!record.email().is_empty());
            assert!(!record.parsed_creation_date().is_fallback());
        }
    }

    #[test]
    fn test_seed_file_reads_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_CLIENTS.as_bytes()).unwrap();

        let source = SeedFile::new(file.path());
        let records = source.fetch().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(source.path(), file.path());
    }

    #[test]
    fn test_seed_file_missing() {
        let source = SeedFile::new("/nonexistent/clients.json");
        let err = source.fetch().unwrap_err();

        assert!(matches!(err, Error::SeedRead { .. }));
        assert!(err.to_string().contains("/nonexistent/clients.json"));
    }

    #[test]
    fn test_seed_text() {
        let source = SeedText(TWO_CLIENTS.to_string());
        assert_eq!(source.fetch().unwrap().len(), 2);
        assert_eq!(source.name(), "inline seed");
    }
}
