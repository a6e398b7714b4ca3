//! Error types for field-group construction and rendering.
//!
//! Rendering and validation gating are permissive by default; the only
//! errors surfaced at runtime come from building a malformed group, parsing
//! stored flags, or opting into strict handling of unknown fields.

use std::collections::HashMap;
use thiserror::Error;

/// The main error type for field-group operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldGroupError {
    /// Two fields in one group share a name.
    #[error("Duplicate field in group: {name}")]
    DuplicateField {
        /// The repeated field name.
        name: String,
    },

    /// A field name is not a plain alphanumeric identifier.
    #[error("Invalid field name: '{name}'")]
    InvalidFieldName {
        /// The rejected name.
        name: String,
    },

    /// A group was built without any fields.
    #[error("Field group must declare at least one field")]
    EmptyGroup,

    /// A field was rendered that the group does not declare.
    #[error("Unknown field for group '{group}': {name}")]
    UnknownField {
        /// The group being rendered.
        group: String,
        /// The undeclared field name.
        name: String,
    },

    /// A stored requirement flag could not be parsed.
    #[error("Invalid requirement flag: '{value}' (expected Y, X or N)")]
    InvalidRequirement {
        /// The raw flag.
        value: String,
    },

    /// A stored column type could not be parsed.
    #[error("Invalid storage type: '{value}'")]
    InvalidStorageType {
        /// The raw type name.
        value: String,
    },

    /// Configuration could not be loaded or applied.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FieldGroupError {
    /// Creates a duplicate field error.
    #[must_use]
    pub fn duplicate_field(name: impl Into<String>) -> Self {
        Self::DuplicateField { name: name.into() }
    }

    /// Creates an invalid field name error.
    #[must_use]
    pub fn invalid_field_name(name: impl Into<String>) -> Self {
        Self::InvalidFieldName { name: name.into() }
    }

    /// Creates an unknown field error.
    #[must_use]
    pub fn unknown_field(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownField {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid requirement error.
    #[must_use]
    pub fn invalid_requirement(value: impl Into<String>) -> Self {
        Self::InvalidRequirement {
            value: value.into(),
        }
    }

    /// Creates an invalid storage type error.
    #[must_use]
    pub fn invalid_storage_type(value: impl Into<String>) -> Self {
        Self::InvalidStorageType {
            value: value.into(),
        }
    }

    /// Returns a stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DuplicateField { .. } => "FIELDGROUP-DUPLICATE",
            Self::InvalidFieldName { .. } => "FIELDGROUP-NAME",
            Self::EmptyGroup => "FIELDGROUP-EMPTY",
            Self::UnknownField { .. } => "FIELDGROUP-UNKNOWN",
            Self::InvalidRequirement { .. } => "FIELDGROUP-REQUIRED-FLAG",
            Self::InvalidStorageType { .. } => "FIELDGROUP-STORAGE-TYPE",
            Self::Config(_) => "FIELDGROUP-CONFIG",
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("code".to_string(), serde_json::json!(self.code()));

        match self {
            Self::DuplicateField { name } | Self::InvalidFieldName { name } => {
                map.insert("name".to_string(), serde_json::json!(name));
            }
            Self::UnknownField { group, name } => {
                map.insert("group".to_string(), serde_json::json!(group));
                map.insert("name".to_string(), serde_json::json!(name));
            }
            Self::InvalidRequirement { value } | Self::InvalidStorageType { value } => {
                map.insert("value".to_string(), serde_json::json!(value));
            }
            Self::EmptyGroup | Self::Config(_) => {}
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

impl From<serde_json::Error> for FieldGroupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_message() {
        let err = FieldGroupError::unknown_field("Parent1Fields", "parent1shoeSize");
        assert_eq!(
            err.to_string(),
            "Unknown field for group 'Parent1Fields': parent1shoeSize"
        );
        assert_eq!(err.code(), "FIELDGROUP-UNKNOWN");
    }

    #[test]
    fn test_to_dict_carries_fields() {
        let err = FieldGroupError::invalid_requirement("Q");
        let dict = err.to_dict();

        assert_eq!(dict.get("code").unwrap(), "FIELDGROUP-REQUIRED-FLAG");
        assert_eq!(dict.get("value").unwrap(), "Q");
        assert!(dict.get("message").unwrap().as_str().unwrap().contains("'Q'"));
    }

    #[test]
    fn test_from_serde_error() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: FieldGroupError = parse.unwrap_err().into();
        assert!(matches!(err, FieldGroupError::Config(_)));
    }
}
