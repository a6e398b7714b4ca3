//! # Fieldgroups
//!
//! Declarative form field groups for registration forms.
//!
//! A field group declares an ordered set of fields (label, help text,
//! requirement, control type) and provides two operations:
//!
//! - **Rendering**: turn one field into rows of a [`form::Form`] document.
//! - **Validation gating**: decide whether a submitted value is validated.
//!
//! When the request already knows who the parent is, the group switches into
//! a read-only mode: the known person's details are shown from their record
//! and only the relationship field stays editable and validated.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldgroups::prelude::*;
//!
//! let group = ParentGuardianFields::new(&settings, people)?;
//! let ctx = ConfigContext::new().with_config("gibbonPersonID", "42");
//!
//! let mut form = Form::new();
//! group.render(&ctx, &mut form)?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod errors;
pub mod fields;
pub mod form;
pub mod groups;
pub mod observability;
pub mod ports;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{FieldGroupConfig, UnknownFieldPolicy};
    pub use crate::errors::FieldGroupError;
    pub use crate::fields::{FieldGroup, FieldSpec, FieldType, Requirement, StorageType};
    pub use crate::form::{Form, Input, InputKind, Layout, Row, RowIndex, Selector, UniqueCheck};
    pub use crate::groups::{
        FieldGroupDefinition, ParentGuardianFields, RenderMode, SubmittedData,
    };
    pub use crate::ports::{
        ConfigContext, PersonLookup, PersonRecord, RenderContext, SettingLookup,
    };
}
