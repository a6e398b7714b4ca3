//! Testing utilities for field groups.
//!
//! In-memory implementations of the ports, for unit tests and for hosts that
//! want to preview a form without a database.

mod fixtures;

pub use fixtures::{sample_person, InMemoryPeople, StaticSettings};
