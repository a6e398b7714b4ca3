//! Ordered, immutable collection of field declarations.

use super::{FieldSpec, StorageType};
use crate::errors::FieldGroupError;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static FIELD_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").ok());

fn is_valid_name(name: &str) -> bool {
    FIELD_NAME
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(name))
}

/// An ordered set of fields keyed by name.
///
/// Declaration order drives row order when the group is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroup {
    fields: Vec<FieldSpec>,
    index: HashMap<String, usize>,
}

impl FieldGroup {
    /// Builds a group from fields in declaration order.
    ///
    /// # Errors
    ///
    /// Fails on an empty list, a repeated name, or a name that is not a plain
    /// alphanumeric identifier. Acquired sub-field names are checked too.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, FieldGroupError> {
        if fields.is_empty() {
            return Err(FieldGroupError::EmptyGroup);
        }

        let mut index = HashMap::with_capacity(fields.len());
        let mut sub_fields = HashSet::new();

        for (position, field) in fields.iter().enumerate() {
            if !is_valid_name(&field.name) {
                return Err(FieldGroupError::invalid_field_name(&field.name));
            }
            if index.insert(field.name.clone(), position).is_some() {
                return Err(FieldGroupError::duplicate_field(&field.name));
            }
            for (sub, _) in &field.acquire {
                if !is_valid_name(sub) {
                    return Err(FieldGroupError::invalid_field_name(sub));
                }
                if !sub_fields.insert(sub.as_str()) {
                    return Err(FieldGroupError::duplicate_field(sub));
                }
            }
        }

        Ok(Self { fields, index })
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Whether the group declares `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    /// Field names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false for a constructed group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of fields a previous submission may prefill.
    #[must_use]
    pub fn prefill_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.prefill)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Every value the group persists, in order.
    ///
    /// Headings store nothing. Composite fields store their acquired
    /// sub-values in place of themselves.
    #[must_use]
    pub fn storage_columns(&self) -> Vec<(&str, StorageType)> {
        let mut columns = Vec::new();
        for field in self.fields.iter().filter(|f| !f.field_type.is_heading()) {
            if field.acquire.is_empty() {
                columns.push((field.name.as_str(), StorageType::Varchar));
            } else {
                columns.extend(field.acquire.iter().map(|(n, t)| (n.as_str(), *t)));
            }
        }
        columns
    }
}

impl<'a> IntoIterator for &'a FieldGroup {
    type Item = &'a FieldSpec;
    type IntoIter = std::slice::Iter<'a, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
