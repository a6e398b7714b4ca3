//! Field declarations and the ordered group that holds them.

mod group;
mod spec;

pub use group::FieldGroup;
pub use spec::{FieldSpec, FieldType, Requirement, StorageType};
