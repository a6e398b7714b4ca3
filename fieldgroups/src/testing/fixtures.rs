//! In-memory port implementations.

use crate::ports::{PersonLookup, PersonRecord, SettingLookup};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Fixed settings keyed by scope and name.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    values: HashMap<(String, String), String>,
}

impl StaticSettings {
    /// Creates an empty settings store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value.
    #[must_use]
    pub fn with(
        mut self,
        scope: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.values.insert((scope.into(), key.into()), value.into());
        self
    }

    /// Settings with email uniqueness set to `flag`.
    #[must_use]
    pub fn unique_email(flag: &str) -> Self {
        Self::new().with("User Admin", "uniqueEmailAddress", flag)
    }
}

impl SettingLookup for StaticSettings {
    fn setting_by_scope(&self, scope: &str, key: &str) -> Option<String> {
        self.values
            .get(&(scope.to_string(), key.to_string()))
            .cloned()
    }
}

/// People directory that records every lookup.
#[derive(Debug, Default)]
pub struct InMemoryPeople {
    records: HashMap<String, PersonRecord>,
    lookups: Mutex<Vec<String>>,
}

impl InMemoryPeople {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, keyed by its identity.
    #[must_use]
    pub fn with_person(mut self, record: PersonRecord) -> Self {
        self.records.insert(record.person_id.clone(), record);
        self
    }

    /// Identities looked up so far, in order.
    #[must_use]
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().clone()
    }

    /// Number of lookups so far.
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().len()
    }
}

impl PersonLookup for InMemoryPeople {
    fn person_by_id(&self, id: &str) -> Option<PersonRecord> {
        self.lookups.lock().push(id.to_string());
        self.records.get(id).cloned()
    }
}

/// A fully populated record with identity `42`.
#[must_use]
pub fn sample_person() -> PersonRecord {
    PersonRecord::new("42")
        .with_username("jdoe")
        .with_surname("Doe")
        .with_preferred_name("Jay")
        .with_email("jdoe@x.com")
}
