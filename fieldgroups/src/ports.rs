//! Collaborators a field group consumes.
//!
//! Field groups never talk to storage or the request directly. Everything
//! they need comes through these narrow traits so a host application can
//! plug in its own settings store, user directory, and form context.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scoped settings store.
pub trait SettingLookup: Send + Sync {
    /// Returns the raw value of `key` within `scope`, if set.
    fn setting_by_scope(&self, scope: &str, key: &str) -> Option<String>;
}

/// Directory of already-registered people.
pub trait PersonLookup: Send + Sync {
    /// Fetches the record for `id`.
    fn person_by_id(&self, id: &str) -> Option<PersonRecord>;
}

/// Per-request configuration of the form being built.
pub trait RenderContext {
    /// Returns the value stored under `key`.
    fn config(&self, key: &str) -> Option<String>;

    /// Whether `key` is present.
    fn has_config(&self, key: &str) -> bool {
        self.config(key).is_some()
    }

    /// Requirement the surrounding form imposes on `field`, overriding the
    /// field's declared requirement.
    fn required_override(&self, _field: &str) -> Option<bool> {
        None
    }
}

/// Display data for a known person.
///
/// Absent fields deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    /// Identity reference.
    #[serde(default, rename = "gibbonPersonID")]
    pub person_id: String,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Family name.
    #[serde(default)]
    pub surname: String,
    /// Everyday name.
    #[serde(default)]
    pub preferred_name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

impl PersonRecord {
    /// Creates a record with only the identity set.
    #[must_use]
    pub fn new(person_id: impl Into<String>) -> Self {
        Self {
            person_id: person_id.into(),
            ..Default::default()
        }
    }

    /// Sets the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the surname.
    #[must_use]
    pub fn with_surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = surname.into();
        self
    }

    /// Sets the preferred name.
    #[must_use]
    pub fn with_preferred_name(mut self, preferred_name: impl Into<String>) -> Self {
        self.preferred_name = preferred_name.into();
        self
    }

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

/// Map-backed [`RenderContext`].
#[derive(Debug, Clone, Default)]
pub struct ConfigContext {
    values: HashMap<String, String>,
    required: HashMap<String, bool>,
}

impl ConfigContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context from existing values.
    #[must_use]
    pub fn from_values(values: HashMap<String, String>) -> Self {
        Self {
            values,
            required: HashMap::new(),
        }
    }

    /// Sets a config value.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Overrides the requirement of a field.
    #[must_use]
    pub fn with_required(mut self, field: impl Into<String>, required: bool) -> Self {
        self.required.insert(field.into(), required);
        self
    }
}

impl RenderContext for ConfigContext {
    fn config(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn required_override(&self, field: &str) -> Option<bool> {
        self.required.get(field).copied()
    }
}
