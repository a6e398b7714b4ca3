//! Rendering and validation tests for the parent/guardian group.

#[cfg(test)]
mod tests {
    use crate::config::{FieldGroupConfig, UnknownFieldPolicy};
    use crate::errors::FieldGroupError;
    use crate::fields::{FieldSpec, FieldType};
    use crate::form::{Element, Form, InputKind, Layout, Row, RowIndex, Selector};
    use crate::groups::{
        FieldGroupDefinition, ParentGuardianFields, SubmittedData, IDENTITY_ANCHOR_FIELD,
        PHONE_ENTRIES, RELATIONSHIP_FIELD,
    };
    use crate::ports::ConfigContext;
    use crate::testing::{sample_person, InMemoryPeople, StaticSettings};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn group_with(settings: &StaticSettings) -> (ParentGuardianFields, Arc<InMemoryPeople>) {
        let people = Arc::new(InMemoryPeople::new().with_person(sample_person()));
        let group = ParentGuardianFields::new(settings, people.clone()).unwrap();
        (group, people)
    }

    fn group() -> ParentGuardianFields {
        group_with(&StaticSettings::new()).0
    }

    fn known_person_ctx() -> ConfigContext {
        ConfigContext::new().with_config("gibbonPersonID", "42")
    }

    fn field(group: &ParentGuardianFields, name: &str) -> FieldSpec {
        group.field(name).unwrap().clone()
    }

    fn row_key(row: &Row) -> String {
        match row.elements.first() {
            Some(Element::Heading { text } | Element::Subheading { text }) => text.clone(),
            _ => row
                .labels()
                .first()
                .map(|l| l.for_field.clone())
                .unwrap_or_default(),
        }
    }

    fn render_one(group: &ParentGuardianFields, ctx: &ConfigContext, name: &str) -> (Form, RowIndex) {
        let mut form = Form::new();
        let index = group
            .add_field_to_form(ctx, &mut form, &field(group, name))
            .unwrap();
        (form, index)
    }

    #[test]
    fn test_description() {
        assert_eq!(
            group().description(),
            "Parent fields enable the creation of parent users once an application has been accepted."
        );
    }

    #[test]
    fn test_declared_order() {
        let group = group();
        assert_eq!(
            group.fields().names(),
            vec![
                "headingParentGuardian1",
                "headingParentGuardian1PersonalData",
                "parent1title",
                "parent1surname",
                "parent1firstName",
                "parent1preferredName",
                "parent1officialName",
                "parent1nameInCharacters",
                "parent1gender",
                "parent1relationship",
                "headingParentGuardian1PersonalBackground",
                "parent1languageFirst",
                "parent1languageSecond",
                "headingParentGuardian1Contact",
                "parent1email",
                "parent1phone",
                "headingParentGuardian1Employment",
                "parent1profession",
                "parent1employer",
            ]
        );
    }

    #[test]
    fn test_normal_render_follows_declaration_order() {
        let group = group();
        let mut form = Form::new();
        let rows = group.render(&ConfigContext::new(), &mut form).unwrap();

        assert_eq!(rows.len(), group.fields().len());
        assert_eq!(form.rows().len(), group.fields().len());

        let expected: Vec<String> = group
            .fields()
            .iter()
            .map(|f| match f.field_type {
                FieldType::Heading | FieldType::Subheading => f.label.clone(),
                FieldType::Phone => format!("{}1", f.name),
                _ => f.name.clone(),
            })
            .collect();
        let rendered: Vec<String> = form.rows().iter().map(row_key).collect();
        assert_eq!(rendered, expected);
        assert!(form.rows().iter().all(|r| !r.is_hidden()));
    }

    #[test]
    fn test_headings_render_label() {
        let (form, index) = render_one(&group(), &ConfigContext::new(), "headingParentGuardian1Contact");
        assert_eq!(
            form.row(index).unwrap().elements,
            vec![Element::Subheading {
                text: "Parent/Guardian 1 Contact".to_string()
            }]
        );
    }

    #[test]
    fn test_text_inputs_carry_constraints() {
        let group = group();
        let ctx = ConfigContext::new();

        let (form, _) = render_one(&group, &ctx, "parent1officialName");
        let input = form.input("parent1officialName").unwrap();
        assert_eq!(input.kind, InputKind::Text);
        assert_eq!(input.max_length, Some(150));
        assert!(input.required);
        assert_eq!(
            input.title.as_deref(),
            Some("Please enter full name as shown in ID documents")
        );

        let (form, _) = render_one(&group, &ctx, "parent1employer");
        let input = form.input("parent1employer").unwrap();
        assert_eq!(input.max_length, Some(90));
        assert!(!input.required);
    }

    #[test]
    fn test_selectors() {
        let group = group();
        let ctx = ConfigContext::new();
        let cases = [
            ("parent1title", Selector::Title),
            ("parent1gender", Selector::Gender),
            ("parent1relationship", Selector::Relationship),
            ("parent1languageFirst", Selector::Language),
        ];

        for (name, selector) in cases {
            let (form, _) = render_one(&group, &ctx, name);
            assert_eq!(form.input(name).unwrap().kind, InputKind::Select(selector));
        }

        let (form, _) = render_one(&group, &ctx, "parent1languageSecond");
        assert_eq!(
            form.input("parent1languageSecond").unwrap().placeholder.as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_label_uses_declared_description() {
        let (form, index) = render_one(&group(), &ConfigContext::new(), "parent1firstName");
        let row = form.row(index).unwrap();
        let label = row.labels()[0];
        assert_eq!(label.text, "First Name");
        assert_eq!(label.description, "First name as shown in ID documents.");

        let (form, index) = render_one(&group(), &ConfigContext::new(), "parent1gender");
        assert_eq!(form.row(index).unwrap().labels()[0].description, "");
    }

    #[test]
    fn test_context_overrides_requirement() {
        let ctx = ConfigContext::new()
            .with_required("parent1surname", false)
            .with_required("parent1employer", true);
        let group = group();

        let (form, _) = render_one(&group, &ctx, "parent1surname");
        assert!(!form.input("parent1surname").unwrap().required);

        let (form, _) = render_one(&group, &ctx, "parent1employer");
        assert!(form.input("parent1employer").unwrap().required);
    }

    #[test]
    fn test_phone_expands_to_two_entries() {
        let group = group();

        for (ctx, required) in [
            (ConfigContext::new(), false),
            (ConfigContext::new().with_required("parent1phone", true), true),
        ] {
            let (form, index) = render_one(&group, &ctx, "parent1phone");
            let row = form.row(index).unwrap();
            let inputs = row.inputs();

            assert_eq!(form.rows().len(), 1);
            assert_eq!(inputs.len(), PHONE_ENTRIES);
            assert_eq!(inputs[0].name, "parent1phone1");
            assert_eq!(inputs[1].name, "parent1phone2");
            assert!(inputs.iter().all(|i| i.kind == InputKind::Phone));
            assert!(inputs.iter().all(|i| i.required == required));

            let labels: Vec<_> = row.labels().iter().map(|l| l.text.clone()).collect();
            assert_eq!(labels, vec!["Phone 1", "Phone 2"]);
            assert!(row
                .labels()
                .iter()
                .all(|l| l.description == "Type, country code, number."));
        }
    }

    #[test]
    fn test_phone_column_layout() {
        let (form, index) = render_one(&group(), &ConfigContext::new(), "parent1phone");
        let row = form.row(index).unwrap();

        let Some(Element::Column(outer)) = row.elements.first() else {
            panic!("phone row should start with a column group");
        };
        assert_eq!(outer.class, "flex-col w-full justify-between items-start");
        assert_eq!(outer.columns().count(), 2);
        assert!(outer
            .columns()
            .all(|c| c.class == "flex flex-row justify-between"));
    }

    #[test]
    fn test_unique_email_check_attached_when_enabled() {
        let (group, _) = group_with(&StaticSettings::unique_email("Y"));
        assert!(group.enforces_unique_email());

        let (form, _) = render_one(&group, &ConfigContext::new(), "parent1email");
        let input = form.input("parent1email").unwrap();
        assert_eq!(input.kind, InputKind::Email);

        let check = input.unique_check.as_ref().unwrap();
        assert_eq!(check.endpoint, "./publicRegistrationCheck.php");
        assert_eq!(check.params.get("fieldName").map(String::as_str), Some("email"));
    }

    #[test]
    fn test_unique_email_check_absent_otherwise() {
        for settings in [
            StaticSettings::unique_email("N"),
            StaticSettings::unique_email("y"),
            StaticSettings::new(),
        ] {
            let (group, _) = group_with(&settings);
            let (form, _) = render_one(&group, &ConfigContext::new(), "parent1email");
            assert!(form.input("parent1email").unwrap().unique_check.is_none());
        }
    }

    #[test]
    fn test_unique_check_uses_configured_endpoint() {
        let people = Arc::new(InMemoryPeople::new());
        let config = FieldGroupConfig::new().with_unique_check_endpoint("/api/unique");
        let group =
            ParentGuardianFields::with_config(&StaticSettings::unique_email("Y"), people, config)
                .unwrap();

        let (form, _) = render_one(&group, &ConfigContext::new(), "parent1email");
        let check = form.input("parent1email").unwrap().unique_check.clone().unwrap();
        assert_eq!(check.endpoint, "/api/unique");
    }

    #[test]
    fn test_known_person_anchor_renders_three_read_only_rows() {
        let (group, people) = group_with(&StaticSettings::new());
        let (form, index) = render_one(&group, &known_person_ctx(), IDENTITY_ANCHOR_FIELD);

        assert_eq!(index, RowIndex(2));
        assert_eq!(form.rows().len(), 3);

        let values: Vec<(String, String)> = form
            .rows()
            .iter()
            .flat_map(|r| r.inputs())
            .map(|i| (i.name.clone(), i.value.clone().unwrap_or_default()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("parent1username".to_string(), "jdoe".to_string()),
                ("parent1surname".to_string(), "Doe".to_string()),
                ("parent1preferredName".to_string(), "Jay".to_string()),
            ]
        );

        for row in form.rows() {
            let input = row.inputs()[0];
            assert!(input.read_only);
            assert_eq!(input.max_length, Some(30));
            assert!(!row.is_hidden());
        }

        assert_eq!(form.hidden_value("parent1email"), Some("jdoe@x.com"));
        assert_eq!(form.hidden_value("parent1gibbonPersonID"), Some("42"));
        assert_eq!(people.lookups(), vec!["42".to_string()]);
    }

    #[test]
    fn test_known_person_labels() {
        let (form, _) = render_one(&group(), &known_person_ctx(), IDENTITY_ANCHOR_FIELD);
        let labels: Vec<(String, String)> = form
            .rows()
            .iter()
            .flat_map(|r| r.labels())
            .map(|l| (l.text.clone(), l.description.clone()))
            .collect();

        assert_eq!(
            labels,
            vec![
                ("Username".to_string(), "System login ID.".to_string()),
                (
                    "Surname".to_string(),
                    "Family name as shown in ID documents.".to_string()
                ),
                (
                    "Preferred Name".to_string(),
                    "Most common name, alias, nickname, etc.".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_missing_person_degrades_to_empty_values() {
        let ctx = ConfigContext::new().with_config("gibbonPersonID", "999");
        let (form, _) = render_one(&group(), &ctx, IDENTITY_ANCHOR_FIELD);

        assert_eq!(form.rows().len(), 3);
        assert!(form
            .rows()
            .iter()
            .flat_map(|r| r.inputs())
            .all(|i| i.value.as_deref() == Some("")));
        assert_eq!(form.hidden_value("parent1email"), Some(""));
        assert_eq!(form.hidden_value("parent1gibbonPersonID"), Some(""));
    }

    #[test]
    fn test_known_person_hides_other_fields() {
        let group = group();
        let ctx = known_person_ctx();

        for name in ["parent1title", "parent1email", "parent1phone", "headingParentGuardian1"] {
            let (form, index) = render_one(&group, &ctx, name);
            let row = form.row(index).unwrap();
            assert_eq!(form.rows().len(), 1);
            assert!(row.is_hidden(), "{name} should be hidden");
            assert!(row.is_empty());
        }
    }

    #[test]
    fn test_known_person_relationship_stays_editable() {
        let (form, index) = render_one(&group(), &known_person_ctx(), RELATIONSHIP_FIELD);
        let row = form.row(index).unwrap();
        let input = form.input(RELATIONSHIP_FIELD).unwrap();

        assert!(!row.is_hidden());
        assert!(!input.read_only);
        assert!(input.required);
        assert_eq!(input.kind, InputKind::Select(Selector::Relationship));
    }

    #[test]
    fn test_known_person_full_render() {
        let (group, people) = group_with(&StaticSettings::unique_email("Y"));
        let mut form = Form::new();
        let rows = group.render(&known_person_ctx(), &mut form).unwrap();

        assert_eq!(rows.len(), group.fields().len());
        assert_eq!(form.rows().len(), group.fields().len() + 2);
        assert_eq!(
            form.rows().iter().filter(|r| r.is_hidden()).count(),
            group.fields().len() - 2
        );
        assert!(form.input("parent1email").is_none());
        assert_eq!(people.lookup_count(), 1);
    }

    #[test]
    fn test_should_validate_without_known_person() {
        let group = group();
        let ctx = ConfigContext::new();
        let mut data = SubmittedData::new();

        for name in group.fields().names() {
            assert!(group.should_validate(&ctx, &mut data, name), "{name}");
        }
        assert!(group.should_validate(&ctx, &mut data, "somethingElse"));
    }

    #[test]
    fn test_should_validate_with_known_person() {
        let group = group();
        let ctx = known_person_ctx();
        let mut data = SubmittedData::new();
        data.insert("parent1surname".to_string(), serde_json::json!("Doe"));
        let before = data.clone();

        for name in group.fields().names() {
            assert_eq!(
                group.should_validate(&ctx, &mut data, name),
                name == RELATIONSHIP_FIELD,
                "{name}"
            );
        }
        assert_eq!(data, before);
    }

    #[test]
    fn test_fields_to_validate() {
        let group = group();
        let mut data = SubmittedData::new();

        let all = group.fields_to_validate(&ConfigContext::new(), &mut data);
        assert_eq!(all.len(), 14);
        assert!(!all.iter().any(|n| n.starts_with("heading")));

        let known = group.fields_to_validate(&known_person_ctx(), &mut data);
        assert_eq!(known, vec![RELATIONSHIP_FIELD.to_string()]);
    }

    #[test]
    fn test_unknown_field_ignored_by_default() {
        let group = group();
        let mut form = Form::new();
        let stray = FieldSpec::new("parent1shoeSize", "Shoe Size");

        let index = group
            .add_field_to_form(&ConfigContext::new(), &mut form, &stray)
            .unwrap();
        let row = form.row(index).unwrap();
        assert!(row.is_empty());
        assert!(!row.is_hidden());

        let index = group
            .add_field_to_form(&known_person_ctx(), &mut form, &stray)
            .unwrap();
        assert!(form.row(index).unwrap().is_hidden());
    }

    #[test]
    fn test_unknown_field_rejected_when_strict() {
        let config = FieldGroupConfig::new().with_unknown_field_policy(UnknownFieldPolicy::Reject);
        let group = ParentGuardianFields::with_config(
            &StaticSettings::new(),
            Arc::new(InMemoryPeople::new()),
            config,
        )
        .unwrap();
        let mut form = Form::new();

        let err = group
            .add_field_to_form(
                &ConfigContext::new(),
                &mut form,
                &FieldSpec::new("parent1shoeSize", "Shoe Size"),
            )
            .unwrap_err();

        assert_eq!(
            err,
            FieldGroupError::unknown_field("ParentGuardian1", "parent1shoeSize")
        );
        assert!(form.rows().is_empty());
    }

    #[test]
    fn test_customised_label_is_rendered() {
        let group = group();
        let mut form = Form::new();
        let mut custom = field(&group, "parent1profession");
        custom.label = "Occupation".to_string();

        group
            .add_field_to_form(&ConfigContext::new(), &mut form, &custom)
            .unwrap();
        assert_eq!(form.rows()[0].labels()[0].text, "Occupation");
    }

    #[test]
    fn test_custom_identity_key() {
        let config = FieldGroupConfig::new().with_identity_config_key("personID");
        let group = ParentGuardianFields::with_config(
            &StaticSettings::new(),
            Arc::new(InMemoryPeople::new().with_person(sample_person())),
            config,
        )
        .unwrap();
        let mut data = SubmittedData::new();

        assert!(group.should_validate(&known_person_ctx(), &mut data, "parent1title"));
        let ctx = ConfigContext::new().with_config("personID", "42");
        assert!(!group.should_validate(&ctx, &mut data, "parent1title"));
    }

    #[test]
    fn test_storage_columns_expand_phone() {
        let group = group();
        let columns: Vec<&str> = group
            .fields()
            .storage_columns()
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(columns.len(), 19);
        assert!(!columns.contains(&"parent1phone"));
        assert!(columns.contains(&"parent1phone2CountryCode"));
        assert!(!columns.iter().any(|c| c.starts_with("heading")));
    }

    #[test]
    fn test_rendered_form_serializes() {
        let (group, _) = group_with(&StaticSettings::unique_email("Y"));
        let mut form = Form::new();
        group.render(&ConfigContext::new(), &mut form).unwrap();

        let json = form.to_json().unwrap();
        assert_eq!(json["rows"].as_array().unwrap().len(), group.fields().len());
    }
}
