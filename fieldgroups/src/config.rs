//! Configuration for field-group rendering.

use crate::errors::FieldGroupError;
use serde::{Deserialize, Serialize};

/// What to do when asked to render a field the group does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Emit an empty row and carry on.
    #[default]
    Ignore,
    /// Fail with `FieldGroupError::UnknownField`.
    Reject,
}

/// Configuration for a field group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroupConfig {
    /// Settings scope holding the email uniqueness flag.
    #[serde(default = "default_setting_scope")]
    pub setting_scope: String,
    /// Settings key holding the email uniqueness flag.
    #[serde(default = "default_unique_email_setting")]
    pub unique_email_setting: String,
    /// Endpoint the client-side uniqueness check calls.
    #[serde(default = "default_unique_check_endpoint")]
    pub unique_check_endpoint: String,
    /// Field name sent to the uniqueness endpoint.
    #[serde(default = "default_unique_check_field")]
    pub unique_check_field: String,
    /// Render-context key that carries an already-known person.
    #[serde(default = "default_identity_config_key")]
    pub identity_config_key: String,
    /// Max length applied to the read-only identity rows.
    #[serde(default = "default_readonly_max_length")]
    pub readonly_max_length: u16,
    /// Handling of undeclared fields.
    #[serde(default)]
    pub unknown_field_policy: UnknownFieldPolicy,
}

fn default_setting_scope() -> String {
    "User Admin".to_string()
}

fn default_unique_email_setting() -> String {
    "uniqueEmailAddress".to_string()
}

fn default_unique_check_endpoint() -> String {
    "./publicRegistrationCheck.php".to_string()
}

fn default_unique_check_field() -> String {
    "email".to_string()
}

fn default_identity_config_key() -> String {
    "gibbonPersonID".to_string()
}

const fn default_readonly_max_length() -> u16 {
    30
}

impl Default for FieldGroupConfig {
    fn default() -> Self {
        Self {
            setting_scope: default_setting_scope(),
            unique_email_setting: default_unique_email_setting(),
            unique_check_endpoint: default_unique_check_endpoint(),
            unique_check_field: default_unique_check_field(),
            identity_config_key: default_identity_config_key(),
            readonly_max_length: default_readonly_max_length(),
            unknown_field_policy: UnknownFieldPolicy::default(),
        }
    }
}

impl FieldGroupConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, FieldGroupError> {
        let config: Self = serde_json::from_str(json)?;
        if config.identity_config_key.is_empty() {
            return Err(FieldGroupError::Config(
                "identity_config_key must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Sets the uniqueness check endpoint.
    #[must_use]
    pub fn with_unique_check_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.unique_check_endpoint = endpoint.into();
        self
    }

    /// Sets the identity context key.
    #[must_use]
    pub fn with_identity_config_key(mut self, key: impl Into<String>) -> Self {
        self.identity_config_key = key.into();
        self
    }

    /// Sets the unknown field policy.
    #[must_use]
    pub const fn with_unknown_field_policy(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_field_policy = policy;
        self
    }
}
