//! Field-group definitions.
//!
//! A field group declares an ordered set of fields, renders each into a
//! [`Form`](crate::form::Form), and decides which submitted values get
//! validated.

mod definition;
mod parent;
#[cfg(test)]
mod parent_tests;

pub use definition::{FieldGroupDefinition, RenderMode, SubmittedData};
pub use parent::{ParentGuardianFields, IDENTITY_ANCHOR_FIELD, PHONE_ENTRIES, RELATIONSHIP_FIELD};
