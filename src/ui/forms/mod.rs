//! Form rendering module
//!
//! - `field_renderer`: one entry field, shaped by its editor kind
//! - `entry_form`: the entry editor
//! - `schema_form`: the schema builder

mod entry_form;
mod field_renderer;
mod schema_form;

pub use entry_form::draw as draw_entry_editor;
pub use schema_form::draw as draw_schema_builder;
