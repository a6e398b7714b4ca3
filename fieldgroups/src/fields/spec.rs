//! Field metadata.

use crate::errors::FieldGroupError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declared requirement of a field, stored as a single-letter flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Requirement {
    /// Required (`Y`).
    #[serde(rename = "Y")]
    Yes,
    /// Required unless the surrounding form relaxes it (`X`).
    #[serde(rename = "X")]
    ConditionallyRequired,
    /// Optional (`N`).
    #[default]
    #[serde(rename = "N")]
    No,
}

impl Requirement {
    /// Returns the stored flag.
    #[must_use]
    pub const fn as_flag(self) -> &'static str {
        match self {
            Self::Yes => "Y",
            Self::ConditionallyRequired => "X",
            Self::No => "N",
        }
    }

    /// Whether the field is required when nothing overrides it.
    #[must_use]
    pub const fn is_required_by_default(self) -> bool {
        !matches!(self, Self::No)
    }
}

impl FromStr for Requirement {
    type Err = FieldGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Y" => Ok(Self::Yes),
            "X" => Ok(Self::ConditionallyRequired),
            "N" | "" => Ok(Self::No),
            other => Err(FieldGroupError::invalid_requirement(other)),
        }
    }
}

/// The kind of control a field renders as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Free text input.
    #[default]
    Text,
    /// Email input.
    Email,
    /// Composite phone block.
    Phone,
    /// Honorific selector.
    Title,
    /// Gender selector.
    Gender,
    /// Relationship selector.
    Relationship,
    /// Language selector.
    Language,
    /// Section heading.
    Heading,
    /// Section subheading.
    Subheading,
}

impl FieldType {
    /// Headings are layout only and carry no submitted value.
    #[must_use]
    pub const fn is_heading(self) -> bool {
        matches!(self, Self::Heading | Self::Subheading)
    }
}

/// Column type for a persisted value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Short string.
    #[default]
    Varchar,
    /// Long text.
    Text,
    /// Calendar date.
    Date,
    /// Integer.
    Int,
}

impl FromStr for StorageType {
    type Err = FieldGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "varchar" => Ok(Self::Varchar),
            "text" => Ok(Self::Text),
            "date" => Ok(Self::Date),
            "int" => Ok(Self::Int),
            _ => Err(FieldGroupError::invalid_storage_type(s)),
        }
    }
}

/// Declaration of a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field identifier, also the submitted key.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Help text shown under the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared requirement.
    #[serde(default)]
    pub required: Requirement,
    /// Whether a previous submission may prefill this field.
    #[serde(default)]
    pub prefill: bool,
    /// Control type.
    #[serde(default, rename = "type")]
    pub field_type: FieldType,
    /// Sub-values a composite field stores instead of itself, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acquire: Vec<(String, StorageType)>,
    /// Maximum input length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
    /// Tooltip for the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Placeholder for the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FieldSpec {
    /// Creates an optional text field.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: None,
            required: Requirement::No,
            prefill: false,
            field_type: FieldType::Text,
            acquire: Vec::new(),
            max_length: None,
            title: None,
            placeholder: None,
        }
    }

    /// Creates a heading.
    #[must_use]
    pub fn heading(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label).with_type(FieldType::Heading)
    }

    /// Creates a subheading.
    #[must_use]
    pub fn subheading(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label).with_type(FieldType::Subheading)
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the requirement.
    #[must_use]
    pub const fn with_required(mut self, required: Requirement) -> Self {
        self.required = required;
        self
    }

    /// Marks the field as prefillable.
    #[must_use]
    pub const fn prefilled(mut self) -> Self {
        self.prefill = true;
        self
    }

    /// Sets the control type.
    #[must_use]
    pub const fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    /// Adds an acquired sub-value.
    #[must_use]
    pub fn acquires(mut self, name: impl Into<String>, storage: StorageType) -> Self {
        self.acquire.push((name.into(), storage));
        self
    }

    /// Sets the maximum input length.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: u16) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the tooltip.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Description or the empty string.
    #[must_use]
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}
