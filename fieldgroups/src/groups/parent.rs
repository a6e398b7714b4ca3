//! First parent/guardian of an application.
//!
//! When the applicant's family is already signed in, the context carries the
//! signed-in person's identity. In that case the parent's personal details are
//! shown read-only from their existing record, and only the relationship to
//! the applicant is asked for.

use super::definition::{FieldGroupDefinition, RenderMode, SubmittedData};
use crate::config::{FieldGroupConfig, UnknownFieldPolicy};
use crate::errors::FieldGroupError;
use crate::fields::{FieldGroup, FieldSpec, FieldType, Requirement, StorageType};
use crate::form::{Column, Form, Input, Layout, Row, RowIndex, Selector, UniqueCheck, HIDDEN_CLASS};
use crate::ports::{PersonLookup, PersonRecord, RenderContext, SettingLookup};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Field that stays editable when a known person is attached.
pub const RELATIONSHIP_FIELD: &str = "parent1relationship";

/// Field whose rendering shows the known person's record.
pub const IDENTITY_ANCHOR_FIELD: &str = "parent1surname";

/// Number of phone entries the phone block expands into.
pub const PHONE_ENTRIES: usize = 2;

const USERNAME_FIELD: &str = "parent1username";
const PREFERRED_NAME_FIELD: &str = "parent1preferredName";
const EMAIL_HIDDEN: &str = "parent1email";
const PERSON_ID_HIDDEN: &str = "parent1gibbonPersonID";

const PHONE_GROUP_CLASS: &str = "flex-col w-full justify-between items-start";
const PHONE_ENTRY_CLASS: &str = "flex flex-row justify-between";

fn declared_fields() -> Vec<FieldSpec> {
    let heading = "Parent/Guardian 1";
    let mut phone = FieldSpec::new("parent1phone", "Phone")
        .with_description("Type, country code, number.")
        .with_type(FieldType::Phone)
        .prefilled();
    for i in 1..=PHONE_ENTRIES {
        phone = phone
            .acquires(format!("parent1phone{i}"), StorageType::Varchar)
            .acquires(format!("parent1phone{i}Type"), StorageType::Varchar)
            .acquires(format!("parent1phone{i}CountryCode"), StorageType::Varchar);
    }

    vec![
        FieldSpec::heading("headingParentGuardian1", heading),
        FieldSpec::subheading(
            "headingParentGuardian1PersonalData",
            format!("{heading} Personal Data"),
        ),
        FieldSpec::new("parent1title", "Title")
            .with_type(FieldType::Title)
            .with_required(Requirement::Yes)
            .prefilled(),
        FieldSpec::new(IDENTITY_ANCHOR_FIELD, "Surname")
            .with_description("Family name as shown in ID documents.")
            .with_required(Requirement::ConditionallyRequired)
            .with_max_length(60)
            .prefilled(),
        FieldSpec::new("parent1firstName", "First Name")
            .with_description("First name as shown in ID documents.")
            .with_required(Requirement::Yes)
            .with_max_length(60)
            .prefilled(),
        FieldSpec::new(PREFERRED_NAME_FIELD, "Preferred Name")
            .with_description("Most common name, alias, nickname, etc.")
            .with_required(Requirement::ConditionallyRequired)
            .with_max_length(60)
            .prefilled(),
        FieldSpec::new("parent1officialName", "Official Name")
            .with_description("Full name as shown in ID documents.")
            .with_required(Requirement::Yes)
            .with_max_length(150)
            .with_title("Please enter full name as shown in ID documents")
            .prefilled(),
        FieldSpec::new("parent1nameInCharacters", "Name In Characters")
            .with_description("Chinese or other character-based name.")
            .with_max_length(60)
            .prefilled(),
        FieldSpec::new("parent1gender", "Gender")
            .with_type(FieldType::Gender)
            .with_required(Requirement::Yes)
            .prefilled(),
        FieldSpec::new(RELATIONSHIP_FIELD, "Relationship")
            .with_type(FieldType::Relationship)
            .with_required(Requirement::Yes)
            .prefilled(),
        FieldSpec::subheading(
            "headingParentGuardian1PersonalBackground",
            format!("{heading} Personal Background"),
        ),
        FieldSpec::new("parent1languageFirst", "First Language")
            .with_description("Student's native/first/mother language.")
            .with_type(FieldType::Language)
            .prefilled(),
        FieldSpec::new("parent1languageSecond", "Second Language")
            .with_type(FieldType::Language)
            .with_placeholder("")
            .prefilled(),
        FieldSpec::subheading("headingParentGuardian1Contact", format!("{heading} Contact")),
        FieldSpec::new("parent1email", "Email")
            .with_type(FieldType::Email)
            .with_required(Requirement::Yes)
            .prefilled(),
        phone,
        FieldSpec::subheading(
            "headingParentGuardian1Employment",
            format!("{heading} Employment"),
        ),
        FieldSpec::new("parent1profession", "Profession")
            .with_required(Requirement::Yes)
            .with_max_length(90)
            .prefilled(),
        FieldSpec::new("parent1employer", "Employer")
            .with_max_length(90)
            .prefilled(),
    ]
}

/// Field group for the first parent or guardian.
pub struct ParentGuardianFields {
    config: FieldGroupConfig,
    people: Arc<dyn PersonLookup>,
    unique_email: bool,
    fields: FieldGroup,
}

impl std::fmt::Debug for ParentGuardianFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParentGuardianFields")
            .field("unique_email", &self.unique_email)
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}

impl ParentGuardianFields {
    /// Creates the group with default configuration.
    pub fn new(
        settings: &dyn SettingLookup,
        people: Arc<dyn PersonLookup>,
    ) -> Result<Self, FieldGroupError> {
        Self::with_config(settings, people, FieldGroupConfig::default())
    }

    /// Creates the group with explicit configuration.
    ///
    /// The email uniqueness setting is read once here.
    pub fn with_config(
        settings: &dyn SettingLookup,
        people: Arc<dyn PersonLookup>,
        config: FieldGroupConfig,
    ) -> Result<Self, FieldGroupError> {
        let unique_email = settings
            .setting_by_scope(&config.setting_scope, &config.unique_email_setting)
            .is_some_and(|flag| flag == "Y");

        Ok(Self {
            config,
            people,
            unique_email,
            fields: FieldGroup::new(declared_fields())?,
        })
    }

    /// Whether email inputs carry a uniqueness check.
    #[must_use]
    pub const fn enforces_unique_email(&self) -> bool {
        self.unique_email
    }

    fn declared_label(&self, name: &str) -> (String, String) {
        self.fields.get(name).map_or_else(
            || (String::new(), String::new()),
            |f| (f.label.clone(), f.description_or_empty().to_string()),
        )
    }

    fn read_only_row(
        &self,
        row: &mut Row,
        name: &str,
        label: &str,
        description: &str,
        value: &str,
    ) {
        row.add_label(name, label, description);
        row.add_input(
            Input::text(name)
                .with_value(value)
                .with_max_length(Some(self.config.readonly_max_length))
                .read_only(),
        );
    }

    fn render_known_person(
        &self,
        form: &mut Form,
        first: RowIndex,
        person_id: &str,
    ) -> RowIndex {
        let person = self.people.person_by_id(person_id).unwrap_or_else(|| {
            warn!(person_id, "Known person not found, showing empty details");
            PersonRecord::default()
        });

        form.add_hidden_value(EMAIL_HIDDEN, person.email.as_str());
        form.add_hidden_value(PERSON_ID_HIDDEN, person.person_id.as_str());

        let (surname_label, surname_desc) = self.declared_label(IDENTITY_ANCHOR_FIELD);
        let (preferred_label, preferred_desc) = self.declared_label(PREFERRED_NAME_FIELD);
        let rows = [
            (
                USERNAME_FIELD,
                "Username".to_string(),
                "System login ID.".to_string(),
                &person.username,
            ),
            (IDENTITY_ANCHOR_FIELD, surname_label, surname_desc, &person.surname),
            (PREFERRED_NAME_FIELD, preferred_label, preferred_desc, &person.preferred_name),
        ];

        let mut last = first;
        for (i, (name, label, description, value)) in rows.iter().enumerate() {
            if i > 0 {
                last = form.add_row();
            }
            if let Some(row) = form.row_mut(last) {
                self.read_only_row(row, name, label, description, value);
            }
        }

        debug!(person_id, rows = rows.len(), "Rendered known person read-only");
        last
    }

    fn render_phone(row: &mut Row, field: &FieldSpec, required: bool) {
        let mut entries = Column::new(PHONE_GROUP_CLASS);
        for i in 1..=PHONE_ENTRIES {
            let name = format!("{}{i}", field.name);
            let mut entry = Column::new(PHONE_ENTRY_CLASS);
            entry.add_label(&name, format!("{} {i}", field.label), field.description_or_empty());
            entry.add_input(Input::phone(name).required(required));
            entries.add_column(entry);
        }
        row.add_column(entries);
    }

    fn render_input(&self, row: &mut Row, field: &FieldSpec, required: bool) {
        row.add_label(&field.name, &field.label, field.description_or_empty());

        let input = match field.field_type {
            FieldType::Email => {
                let input = Input::email(&field.name);
                if self.unique_email {
                    info!(
                        field = %field.name,
                        endpoint = %self.config.unique_check_endpoint,
                        "Attaching uniqueness check"
                    );
                    input.with_unique_check(UniqueCheck::new(
                        &self.config.unique_check_endpoint,
                        &self.config.unique_check_field,
                    ))
                } else {
                    input
                }
            }
            FieldType::Title => Input::select(&field.name, Selector::Title),
            FieldType::Gender => Input::select(&field.name, Selector::Gender),
            FieldType::Relationship => Input::select(&field.name, Selector::Relationship),
            FieldType::Language => Input::select(&field.name, Selector::Language),
            _ => Input::text(&field.name),
        };

        row.add_input(
            input
                .required(required)
                .with_max_length(field.max_length)
                .with_placeholder(field.placeholder.clone())
                .with_title(field.title.clone()),
        );
    }
}

impl FieldGroupDefinition for ParentGuardianFields {
    fn name(&self) -> &str {
        "ParentGuardian1"
    }

    fn description(&self) -> String {
        "Parent fields enable the creation of parent users once an application has been accepted."
            .to_string()
    }

    fn fields(&self) -> &FieldGroup {
        &self.fields
    }

    fn add_field_to_form(
        &self,
        ctx: &dyn RenderContext,
        form: &mut Form,
        field: &FieldSpec,
    ) -> Result<RowIndex, FieldGroupError> {
        let known = self.fields.contains(&field.name);
        if !known && self.config.unknown_field_policy == UnknownFieldPolicy::Reject {
            return Err(FieldGroupError::unknown_field(self.name(), &field.name));
        }

        let required = self.required(ctx, field);
        let index = form.add_row();

        let mode = RenderMode::select(
            ctx,
            &self.config.identity_config_key,
            &field.name,
            RELATIONSHIP_FIELD,
        );
        debug!(field = %field.name, ?mode, required, "Rendering field");

        if let RenderMode::ReadOnlyIdentity { person_id } = mode {
            if field.name == IDENTITY_ANCHOR_FIELD {
                return Ok(self.render_known_person(form, index, &person_id));
            }
            if let Some(row) = form.row_mut(index) {
                row.add_class(HIDDEN_CLASS);
            }
            return Ok(index);
        }

        if !known {
            warn!(group = self.name(), field = %field.name, "Skipping undeclared field");
            return Ok(index);
        }

        if let Some(row) = form.row_mut(index) {
            match field.field_type {
                FieldType::Heading => row.add_heading(&field.label),
                FieldType::Subheading => row.add_subheading(&field.label),
                FieldType::Phone => Self::render_phone(row, field, required),
                _ => self.render_input(row, field, required),
            }
        }

        Ok(index)
    }

    fn should_validate(
        &self,
        ctx: &dyn RenderContext,
        _data: &mut SubmittedData,
        field_name: &str,
    ) -> bool {
        !RenderMode::select(
            ctx,
            &self.config.identity_config_key,
            field_name,
            RELATIONSHIP_FIELD,
        )
        .is_read_only()
    }
}
