//! In-memory client repository.
//!
//! [`ClientRepository`] is the sole owner of the ordered client list. Insertion
//! order is display order, and no two clients share an email address (compared
//! case-insensitively), except where a whole list was taken as-is from
//! [`load`](ClientRepository::load).
//!
//! All mutation goes through `&mut self`. To share a repository between
//! threads, wrap it in a `Mutex`.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::client::ClientRecord;
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::seed::ClientSource;

/// Ordered, deduplicated collection of clients.
#[derive(Debug, Clone, Default)]
pub struct ClientRepository<C: Clock = SystemClock> {
    clients: Vec<ClientRecord>,
    clock: C,
}

impl ClientRepository {
    /// Create an empty repository using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `records` as-is, using the system clock.
    #[must_use]
    pub fn from_records(records: Vec<ClientRecord>) -> Self {
        Self {
            clients: records,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> ClientRepository<C> {
    /// Create an empty repository that reads "now" from `clock`.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            clients: Vec::new(),
            clock,
        }
    }

    /// Add a new client stamped with the current instant.
    ///
    /// Returns the stored record. Name and email are not validated here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEmail`] if a client with the same email
    /// (ignoring case) exists; the repository is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use relayance::ClientRepository;
    ///
    /// let mut repo = ClientRepository::new();
    /// assert!(repo.add("Alice", "a@x.com").is_ok());
    /// assert!(repo.add("Alice2", "A@X.COM").unwrap_err().is_duplicate());
    /// assert_eq!(repo.len(), 1);
    /// ```
    pub fn add(&mut self, name: impl Into<String>, email: impl Into<String>) -> Result<&ClientRecord> {
        let client = ClientRecord::create_at(name, email, &self.clock);

        if client.exists_in(&self.clients) {
            debug!("Rejected duplicate client {}", client.email());
            return Err(Error::duplicate_email(client.email()));
        }

        debug!("Added client {}", client);
        let index = self.clients.len();
        self.clients.push(client);
        Ok(&self.clients[index])
    }

    /// Remove the first client equal to `record`.
    ///
    /// Returns `false` and leaves the repository unchanged if none matches.
    pub fn delete(&mut self, record: &ClientRecord) -> bool {
        match self.clients.iter().position(|client| client == record) {
            Some(index) => {
                let removed = self.clients.remove(index);
                debug!("Deleted client {}", removed);
                true
            }
            None => {
                debug!("Delete of absent client {} ignored", record);
                false
            }
        }
    }

    /// Remove the first client whose email matches `email` (ignoring case).
    ///
    /// A loaded list may hold several clients with the same email; only the
    /// earliest one is removed per call.
    pub fn delete_by_email(&mut self, email: &str) -> Option<ClientRecord> {
        let index = self.clients.iter().position(|client| client.has_email(email))?;
        let removed = self.clients.remove(index);
        debug!("Deleted client {}", removed);
        Some(removed)
    }

    /// Whether `record` was created today.
    #[must_use]
    pub fn is_new(&self, record: &ClientRecord) -> bool {
        record.is_created_today_at(&self.clock)
    }

    /// The creation date of `record` as `DD-MM-YYYY`.
    #[must_use]
    pub fn format_date(&self, record: &ClientRecord) -> String {
        record.formatted_creation_date_at(&self.clock)
    }

    /// Replace every client with the contents of `source`.
    ///
    /// The source is read completely before anything is replaced, so on
    /// error the repository keeps its previous contents. Loaded records are
    /// not deduplicated.
    ///
    /// # Errors
    ///
    /// Returns the source's error if it cannot be read or decoded.
    pub fn load<S: ClientSource + ?Sized>(&mut self, source: &S) -> Result<usize> {
        let records = source.fetch()?;
        self.clients = records;
        info!("Loaded {} clients from {}", self.clients.len(), source.name());
        Ok(self.clients.len())
    }

    /// All clients in display order.
    #[must_use]
    pub fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    /// Iterate over clients in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, ClientRecord> {
        self.clients.iter()
    }

    /// The client at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ClientRecord> {
        self.clients.get(index)
    }

    /// Number of clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether there are no clients.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Look up the first client with `email`, ignoring case.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&ClientRecord> {
        self.clients.iter().find(|client| client.has_email(email))
    }

    /// Clients created today, in display order.
    #[must_use]
    pub fn new_today(&self) -> Vec<&ClientRecord> {
        self.clients
            .iter()
            .filter(|client| self.is_new(client))
            .collect()
    }

    /// Summary of the repository contents.
    #[must_use]
    pub fn stats(&self) -> RepositoryStats {
        let parsed: Vec<DateTime<Utc>> = self
            .clients
            .iter()
            .filter_map(|client| client.parsed_creation_date().parsed())
            .collect();

        RepositoryStats {
            total: self.clients.len(),
            new_today: self.new_today().len(),
            unparsed_dates: self.clients.len() - parsed.len(),
            oldest: parsed.iter().min().copied(),
            newest: parsed.iter().max().copied(),
        }
    }
}

impl<'a, C: Clock> IntoIterator for &'a ClientRepository<C> {
    type Item = &'a ClientRecord;
    type IntoIter = std::slice::Iter<'a, ClientRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Statistics about the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryStats {
    /// Total number of clients.
    pub total: usize,
    /// Clients created today.
    pub new_today: usize,
    /// Clients whose creation date could not be parsed.
    pub unparsed_dates: usize,
    /// Earliest parsed creation date.
    pub oldest: Option<DateTime<Utc>>,
    /// Latest parsed creation date.
    pub newest: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::seed::{SeedFile, SeedText};
    use chrono::{Duration, TimeZone};

    fn noon_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 10, 12, 0, 0).unwrap()
    }

    fn create_test_repository() -> ClientRepository<FixedClock> {
        ClientRepository::with_clock(FixedClock::new(noon_utc()))
    }

    #[test]
    fn test_add_appends() {
        let mut repo = create_test_repository();

        let added = repo.add("Martin Dupont", "martin@example.com").unwrap().clone();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get(0), Some(&added));
        assert_eq!(added.name(), "Martin Dupont");
        assert_eq!(added.email(), "martin@example.com");
        assert!(repo.is_new(&added));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut repo = create_test_repository();
        repo.add("First", "first@example.com").unwrap();
        repo.add("Second", "second@example.com").unwrap();
        repo.add("Third", "third@example.com").unwrap();

        let names: Vec<&str> = repo.iter().map(ClientRecord::name).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut repo = create_test_repository();
        repo.add("Martin Dupont", "martin@example.com").unwrap();

        let err = repo.add("Martin Dupont", "martin@example.com").unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_add_duplicate_ignores_case() {
        let mut repo = create_test_repository();
        repo.add("Alice", "a@x.com").unwrap();

        assert!(repo.add("Alice2", "A@X.COM").is_err());
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get(0).unwrap().name(), "Alice");
    }

    #[test]
    fn test_add_against_loaded_clients() {
        let mut repo = create_test_repository();
        repo.load(&SeedText(
            r#"[{"nom": "Jean", "email": "Jean@Example.com", "date_creation": "2023-01-15"}]"#
                .to_string(),
        ))
        .unwrap();

        assert!(repo.add("Jean bis", "jean@example.com").unwrap_err().is_duplicate());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_add_accepts_unvalidated_input() {
        let mut repo = create_test_repository();

        assert!(repo.add("Alice Dupont", "alice.example.com").is_ok());
        assert!(repo.add("", "contact@example.com").is_ok());
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get(1).unwrap().name(), "");
    }

    #[test]
    fn test_add_stamps_clock() {
        let mut repo = create_test_repository();
        let added = repo.add("Jean", "jean@example.com").unwrap();

        assert_eq!(added.creation_date_raw(), "2024-07-10T12:00:00.000Z");
    }

    #[test]
    fn test_delete_existing() {
        let mut repo = create_test_repository();
        let client = repo.add("Jean Dupont", "jean@example.com").unwrap().clone();

        assert!(repo.delete(&client));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut repo = create_test_repository();
        repo.add("Jean Dupont", "jean@example.com").unwrap();
        let stranger = ClientRecord::create("Pierre Martin", "pierre@example.com");

        assert!(!repo.delete(&stranger));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut repo = create_test_repository();
        let first = repo.add("First", "first@example.com").unwrap().clone();
        repo.add("Second", "second@example.com").unwrap();

        repo.delete(&first);
        let after_once = repo.clients().to_vec();
        repo.delete(&first);

        assert_eq!(repo.clients(), after_once.as_slice());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_delete_requires_full_equality() {
        let mut repo = ClientRepository::from_records(vec![ClientRecord::new(
            "Jean",
            "jean@example.com",
            "2023-01-15",
        )]);
        let same_email_other_date = ClientRecord::new("Jean", "jean@example.com", "2023-01-16");

        assert!(!repo.delete(&same_email_other_date));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_delete_removes_first_match_only() {
        let twin = ClientRecord::new("Jean", "jean@example.com", "2023-01-15");
        let mut repo = ClientRepository::from_records(vec![twin.clone(), twin.clone()]);

        assert!(repo.delete(&twin));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_delete_by_email() {
        let mut repo = create_test_repository();
        repo.add("Jean", "jean@example.com").unwrap();

        let removed = repo.delete_by_email("JEAN@example.com").unwrap();
        assert_eq!(removed.name(), "Jean");
        assert!(repo.is_empty());
        assert!(repo.delete_by_email("jean@example.com").is_none());
    }

    #[test]
    fn test_is_new_for_old_client() {
        let repo = create_test_repository();
        let yesterday = crate::temporal::stamp(&(noon_utc() - Duration::days(1)));
        let old = ClientRecord::new("Robert Martin", "robert@example.com", yesterday);

        assert!(!repo.is_new(&old));
    }

    #[test]
    fn test_format_date() {
        let repo = create_test_repository();
        let client = ClientRecord::new("Martine Dubois", "martine@example.com", "2023-02-20");

        assert_eq!(repo.format_date(&client), "20-02-2023");
    }

    #[test]
    fn test_load_empty() {
        let mut repo = create_test_repository();
        repo.add("Jean", "jean@example.com").unwrap();

        assert_eq!(repo.load(&SeedText("[]".to_string())).unwrap(), 0);
        assert!(repo.is_empty());
    }

    #[test]
    fn test_load_two_records_in_order() {
        let mut repo = create_test_repository();
        let seed = SeedText(
            r#"[
                {"nom": "Jean Dupont", "email": "jean@example.com", "date_creation": "2023-01-15T10:30:00.000Z"},
                {"nom": "Marie Martin", "email": "marie.martin@example.com", "date_creation": "2023-02-20T09:15:00.000Z"}
            ]"#
            .to_string(),
        );

        assert_eq!(repo.load(&seed).unwrap(), 2);
        assert_eq!(repo.get(0).unwrap().name(), "Jean Dupont");
        assert_eq!(repo.get(1).unwrap().email(), "marie.martin@example.com");
    }

    #[test]
    fn test_load_replaces_without_merge() {
        let mut repo = create_test_repository();
        repo.add("Old", "old@example.com").unwrap();
        repo.load(&SeedText(
            r#"[{"nom": "New", "email": "new@example.com", "date_creation": "2023-01-15"}]"#
                .to_string(),
        ))
        .unwrap();

        assert_eq!(repo.len(), 1);
        assert!(repo.find_by_email("old@example.com").is_none());
    }

    #[test]
    fn test_loaded_duplicate_emails_resolve_in_order() {
        let mut repo = create_test_repository();
        repo.load(&SeedText(
            r#"[
                {"nom": "Jean Premier", "email": "jean@example.com", "date_creation": "2023-01-15"},
                {"nom": "Marie", "email": "marie@example.com", "date_creation": "2023-01-16"},
                {"nom": "Jean Second", "email": "JEAN@example.com", "date_creation": "2023-01-17"}
            ]"#
            .to_string(),
        ))
        .unwrap();

        assert_eq!(repo.len(), 3);
        assert_eq!(repo.find_by_email("jean@example.com").unwrap().name(), "Jean Premier");
        assert!(repo.add("Jean Troisieme", "jean@example.com").is_err());

        assert_eq!(repo.delete_by_email("jean@example.com").unwrap().name(), "Jean Premier");
        assert_eq!(repo.find_by_email("jean@example.com").unwrap().name(), "Jean Second");

        assert_eq!(repo.delete_by_email("jean@example.com").unwrap().name(), "Jean Second");
        assert!(repo.delete_by_email("jean@example.com").is_none());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_from_records_keeps_duplicates() {
        let records = vec![
            ClientRecord::new("Jean", "jean@example.com", "2023-01-15"),
            ClientRecord::new("Jean", "jean@example.com", "2023-01-15"),
        ];
        let mut repo = ClientRepository::from_records(records);

        assert_eq!(repo.len(), 2);
        assert!(repo.delete(&ClientRecord::new("Jean", "jean@example.com", "2023-01-15")));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_load_failure_leaves_repository_unchanged() {
        let mut repo = create_test_repository();
        repo.add("Jean", "jean@example.com").unwrap();
        let before = repo.clients().to_vec();

        assert!(repo.load(&SeedText("[{\"nom\": 1}]".to_string())).is_err());
        assert!(repo.load(&SeedFile::new("/nonexistent/clients.json")).is_err());
        assert_eq!(repo.clients(), before.as_slice());
    }

    #[test]
    fn test_find_by_email() {
        let mut repo = create_test_repository();
        repo.add("Jean", "jean@example.com").unwrap();

        assert!(repo.find_by_email("JEAN@EXAMPLE.COM").is_some());
        assert!(repo.find_by_email("marie@example.com").is_none());
    }

    #[test]
    fn test_new_today() {
        let mut repo = ClientRepository::with_clock(FixedClock::new(noon_utc()));
        repo.load(&SeedText(
            r#"[{"nom": "Old", "email": "old@example.com", "date_creation": "2023-01-15T10:30:00.000Z"}]"#
                .to_string(),
        ))
        .unwrap();
        repo.add("Fresh", "fresh@example.com").unwrap();

        let fresh: Vec<&str> = repo.new_today().into_iter().map(ClientRecord::name).collect();
        assert_eq!(fresh, ["Fresh"]);
    }

    #[test]
    fn test_stats_empty() {
        let repo = create_test_repository();
        let stats = repo.stats();

        assert_eq!(stats.total, 0);
        assert_eq!(stats.new_today, 0);
        assert!(stats.oldest.is_none());
        assert!(stats.newest.is_none());
    }

    #[test]
    fn test_stats_with_data() {
        let mut repo = ClientRepository::with_clock(FixedClock::new(noon_utc()));
        repo.load(&SeedText(
            r#"[
                {"nom": "A", "email": "a@example.com", "date_creation": "2023-01-15T10:30:00.000Z"},
                {"nom": "B", "email": "b@example.com", "date_creation": "not a date"}
            ]"#
            .to_string(),
        ))
        .unwrap();
        repo.add("C", "c@example.com").unwrap();

        let stats = repo.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.new_today, 2);
        assert_eq!(stats.unparsed_dates, 1);
        assert_eq!(
            stats.oldest,
            Some(Utc.with_ymd_and_hms(2023, 1, 15, 10, 30, 0).unwrap())
        );
        assert_eq!(stats.newest, Some(noon_utc()));
    }

    #[test]
    fn test_into_iterator() {
        let mut repo = create_test_repository();
        repo.add("Jean", "jean@example.com").unwrap();

        let mut count = 0;
        for client in &repo {
            assert_eq!(client.name(), "Jean");
            count += 1;
        }
        assert_eq!(count, 1);
    }
}
