//! Form domain layer
//!
//! Editable views over an entry's state and a schema being authored.

mod field;
mod form_state;
mod schema_form;

pub use field::FormField;
pub use form_state::{EntryForm, Form};
pub use schema_form::{SchemaCell, SchemaForm};
