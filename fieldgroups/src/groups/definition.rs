//! The contract every field group implements.

use crate::errors::FieldGroupError;
use crate::fields::{FieldGroup, FieldSpec};
use crate::form::{Form, RowIndex};
use crate::ports::RenderContext;
use std::collections::HashMap;

/// Submitted form values, keyed by field name.
pub type SubmittedData = HashMap<String, serde_json::Value>;

/// How a field is rendered for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    /// Editable inputs, validated on submit.
    Normal,
    /// A known person is attached: show their details read-only and skip
    /// validation.
    ReadOnlyIdentity {
        /// Identity reference taken from the context.
        person_id: String,
    },
}

impl RenderMode {
    /// Chooses the mode for `field`.
    ///
    /// Read-only mode applies when the context carries `identity_key` and the
    /// field is not the one that stays editable.
    #[must_use]
    pub fn select(
        ctx: &dyn RenderContext,
        identity_key: &str,
        field: &str,
        editable_field: &str,
    ) -> Self {
        if field == editable_field || !ctx.has_config(identity_key) {
            return Self::Normal;
        }
        Self::ReadOnlyIdentity {
            person_id: ctx.config(identity_key).unwrap_or_default(),
        }
    }

    /// Whether this is the read-only identity mode.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnlyIdentity { .. })
    }
}

/// A named, ordered set of form fields that knows how to render and gate
/// validation for each of them.
pub trait FieldGroupDefinition: Send + Sync {
    /// Short identifier of the group.
    fn name(&self) -> &str;

    /// Human-readable summary shown to form designers.
    fn description(&self) -> String;

    /// The declared fields.
    fn fields(&self) -> &FieldGroup;

    /// Renders `field` into `form` and returns the last row written.
    fn add_field_to_form(
        &self,
        ctx: &dyn RenderContext,
        form: &mut Form,
        field: &FieldSpec,
    ) -> Result<RowIndex, FieldGroupError>;

    /// Whether the submitted value of `field_name` should be validated.
    fn should_validate(
        &self,
        ctx: &dyn RenderContext,
        data: &mut SubmittedData,
        field_name: &str,
    ) -> bool;

    /// Looks up a declared field.
    fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().get(name)
    }

    /// Effective requirement of `field`: the context override if any,
    /// otherwise the declared requirement.
    fn required(&self, ctx: &dyn RenderContext, field: &FieldSpec) -> bool {
        ctx.required_override(&field.name)
            .unwrap_or_else(|| field.required.is_required_by_default())
    }

    /// Renders every declared field in order.
    fn render(
        &self,
        ctx: &dyn RenderContext,
        form: &mut Form,
    ) -> Result<Vec<RowIndex>, FieldGroupError> {
        self.fields()
            .iter()
            .map(|field| self.add_field_to_form(ctx, form, field))
            .collect()
    }

    /// Names of value-carrying fields that should be validated, in order.
    fn fields_to_validate(&self, ctx: &dyn RenderContext, data: &mut SubmittedData) -> Vec<String> {
        let candidates: Vec<String> = self
            .fields()
            .iter()
            .filter(|f| !f.field_type.is_heading())
            .map(|f| f.name.clone())
            .collect();

        candidates
            .into_iter()
            .filter(|name| self.should_validate(ctx, data, name))
            .collect()
    }
}
