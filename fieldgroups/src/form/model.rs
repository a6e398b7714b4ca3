//! Serializable form document.

use crate::errors::FieldGroupError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CSS class that hides a row from the rendered layout.
pub const HIDDEN_CLASS: &str = "hidden";

/// Position of a row within its form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowIndex(pub usize);

/// Selector flavours with their own option sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    /// Honorifics.
    Title,
    /// Genders.
    Gender,
    /// Relationships to the applicant.
    Relationship,
    /// Languages.
    Language,
}

/// Kind of input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "source", rename_all = "snake_case")]
pub enum InputKind {
    /// Single-line text.
    Text,
    /// Email address.
    Email,
    /// Phone number with type and country code.
    Phone,
    /// Drop-down selector.
    Select(Selector),
}

/// Client-side hint to check a value's uniqueness against a server endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueCheck {
    /// Endpoint to query.
    pub endpoint: String,
    /// Extra request parameters.
    pub params: BTreeMap<String, String>,
}

impl UniqueCheck {
    /// Creates a check against `endpoint` sending `fieldName=<field>`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, field: impl Into<String>) -> Self {
        let mut params = BTreeMap::new();
        params.insert("fieldName".to_string(), field.into());
        Self {
            endpoint: endpoint.into(),
            params,
        }
    }
}

/// A label with optional help text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Input the label belongs to.
    pub for_field: String,
    /// Label text.
    pub text: String,
    /// Help text; empty when none.
    pub description: String,
}

/// An input control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// Submitted key.
    pub name: String,
    /// Control kind.
    pub kind: InputKind,
    /// Initial value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether a value must be supplied.
    pub required: bool,
    /// Whether the user may edit the value.
    pub read_only: bool,
    /// Maximum length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
    /// Placeholder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Tooltip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Asynchronous uniqueness check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_check: Option<UniqueCheck>,
}

impl Input {
    /// Creates an optional, editable input.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: InputKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: None,
            required: false,
            read_only: false,
            max_length: None,
            placeholder: None,
            title: None,
            unique_check: None,
        }
    }

    /// Creates a text input.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, InputKind::Text)
    }

    /// Creates an email input.
    #[must_use]
    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, InputKind::Email)
    }

    /// Creates a phone input.
    #[must_use]
    pub fn phone(name: impl Into<String>) -> Self {
        Self::new(name, InputKind::Phone)
    }

    /// Creates a selector.
    #[must_use]
    pub fn select(name: impl Into<String>, selector: Selector) -> Self {
        Self::new(name, InputKind::Select(selector))
    }

    /// Sets the requirement.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Makes the input read-only.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets or clears the maximum length.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: Option<u16>) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets or clears the placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Sets or clears the tooltip.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Attaches a uniqueness check.
    #[must_use]
    pub fn with_unique_check(mut self, check: UniqueCheck) -> Self {
        self.unique_check = Some(check);
        self
    }
}

/// Content of a row or column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum Element {
    /// Section heading.
    Heading {
        /// Heading text.
        text: String,
    },
    /// Section subheading.
    Subheading {
        /// Subheading text.
        text: String,
    },
    /// Label.
    Label(Label),
    /// Input.
    Input(Input),
    /// Nested column.
    Column(Column),
}

/// Anything that lays out elements: rows and columns.
pub trait Layout {
    /// Mutable element list.
    fn elements_mut(&mut self) -> &mut Vec<Element>;

    /// Element list.
    fn elements(&self) -> &[Element];

    /// Adds a label.
    fn add_label(
        &mut self,
        for_field: impl Into<String>,
        text: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.elements_mut().push(Element::Label(Label {
            for_field: for_field.into(),
            text: text.into(),
            description: description.into(),
        }));
    }

    /// Adds an input.
    fn add_input(&mut self, input: Input) {
        self.elements_mut().push(Element::Input(input));
    }

    /// Adds a nested column.
    fn add_column(&mut self, column: Column) {
        self.elements_mut().push(Element::Column(column));
    }

    /// All inputs, depth-first.
    fn inputs(&self) -> Vec<&Input> {
        let mut found = Vec::new();
        collect_inputs(self.elements(), &mut found);
        found
    }

    /// All labels, depth-first.
    fn labels(&self) -> Vec<&Label> {
        let mut found = Vec::new();
        collect_labels(self.elements(), &mut found);
        found
    }
}

fn collect_inputs<'a>(elements: &'a [Element], found: &mut Vec<&'a Input>) {
    for element in elements {
        match element {
            Element::Input(input) => found.push(input),
            Element::Column(column) => collect_inputs(&column.elements, found),
            _ => {}
        }
    }
}

fn collect_labels<'a>(elements: &'a [Element], found: &mut Vec<&'a Label>) {
    for element in elements {
        match element {
            Element::Label(label) => found.push(label),
            Element::Column(column) => collect_labels(&column.elements, found),
            _ => {}
        }
    }
}

/// A column inside a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// CSS classes.
    pub class: String,
    /// Contents.
    pub elements: Vec<Element>,
}

impl Column {
    /// Creates an empty column.
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            elements: Vec::new(),
        }
    }

    /// Direct child columns.
    pub fn columns(&self) -> impl Iterator<Item = &Self> {
        self.elements.iter().filter_map(|e| match e {
            Element::Column(column) => Some(column),
            _ => None,
        })
    }
}

impl Layout for Column {
    fn elements_mut(&mut self) -> &mut Vec<Element> {
        &mut self.elements
    }

    fn elements(&self) -> &[Element] {
        &self.elements
    }
}

/// A single form row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// CSS classes.
    pub classes: Vec<String>,
    /// Contents.
    pub elements: Vec<Element>,
}

impl Row {
    /// Adds a CSS class.
    pub fn add_class(&mut self, class: impl Into<String>) {
        self.classes.push(class.into());
    }

    /// Whether the row is hidden from layout.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.classes.iter().any(|c| c == HIDDEN_CLASS)
    }

    /// Adds a heading.
    pub fn add_heading(&mut self, text: impl Into<String>) {
        self.elements.push(Element::Heading { text: text.into() });
    }

    /// Adds a subheading.
    pub fn add_subheading(&mut self, text: impl Into<String>) {
        self.elements.push(Element::Subheading { text: text.into() });
    }

    /// Whether the row has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Layout for Row {
    fn elements_mut(&mut self) -> &mut Vec<Element> {
        &mut self.elements
    }

    fn elements(&self) -> &[Element] {
        &self.elements
    }
}

/// A form under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    rows: Vec<Row>,
    hidden: BTreeMap<String, String>,
}

impl Form {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an empty row and returns its index.
    pub fn add_row(&mut self) -> RowIndex {
        self.rows.push(Row::default());
        RowIndex(self.rows.len() - 1)
    }

    /// Returns a row.
    #[must_use]
    pub fn row(&self, index: RowIndex) -> Option<&Row> {
        self.rows.get(index.0)
    }

    /// Returns a row for editing.
    pub fn row_mut(&mut self, index: RowIndex) -> Option<&mut Row> {
        self.rows.get_mut(index.0)
    }

    /// All rows in order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Stores a value submitted with the form but not shown.
    pub fn add_hidden_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.hidden.insert(name.into(), value.into());
    }

    /// Returns a hidden value.
    #[must_use]
    pub fn hidden_value(&self, name: &str) -> Option<&str> {
        self.hidden.get(name).map(String::as_str)
    }

    /// Finds an input by name across all rows.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<&Input> {
        self.rows
            .iter()
            .flat_map(|row| row.inputs())
            .find(|input| input.name == name)
    }

    /// Serializes the form for the rendering layer.
    pub fn to_json(&self) -> Result<serde_json::Value, FieldGroupError> {
        Ok(serde_json::to_value(self)?)
    }
}
