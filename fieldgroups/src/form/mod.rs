//! The form document field groups render into.
//!
//! Rows hold labels, inputs, headings and nested columns. The document is
//! plain data: a separate rendering layer turns it into markup.

mod model;

pub use model::{
    Column, Element, Form, Input, InputKind, Label, Layout, Row, RowIndex, Selector, UniqueCheck,
    HIDDEN_CLASS,
};
