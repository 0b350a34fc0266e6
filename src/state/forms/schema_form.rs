//! Schema builder form: a type-name input followed by one row per field

use super::form_state::Form;
use crate::schema::{ContentTypeSchema, FieldAttribute, SchemaBuilder};

/// Cells per field row: name, kind, required
const COLUMNS: usize = 3;

/// The focused cell of the builder form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaCell {
    TypeName,
    Name(usize),
    Kind(usize),
    Required(usize),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaForm {
    pub builder: SchemaBuilder,
    pub active_field_index: usize,
}

impl SchemaForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_cell(&self) -> SchemaCell {
        match self.active_field_index {
            0 => SchemaCell::TypeName,
            n => {
                let row = (n - 1) / COLUMNS;
                match (n - 1) % COLUMNS {
                    0 => SchemaCell::Name(row),
                    1 => SchemaCell::Kind(row),
                    _ => SchemaCell::Required(row),
                }
            }
        }
    }

    /// Row index of the focused field, if a field row is focused
    pub fn active_row(&self) -> Option<usize> {
        match self.active_cell() {
            SchemaCell::TypeName => None,
            SchemaCell::Name(row) | SchemaCell::Kind(row) | SchemaCell::Required(row) => Some(row),
        }
    }

    /// Whether the focused cell takes typed text
    pub fn is_text_cell(&self) -> bool {
        matches!(self.active_cell(), SchemaCell::TypeName | SchemaCell::Name(_))
    }

    /// Type into the focused text cell
    pub fn input_char(&mut self, c: char) {
        match self.active_cell() {
            SchemaCell::TypeName => {
                let mut name = self.builder.type_name().to_string();
                name.push(c);
                self.builder.set_type_name(name);
            }
            SchemaCell::Name(row) => {
                let mut name = self.builder.fields()[row].name.clone();
                name.push(c);
                self.builder.update_field(row, FieldAttribute::Name(name));
            }
            SchemaCell::Kind(_) | SchemaCell::Required(_) => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active_cell() {
            SchemaCell::TypeName => {
                let mut name = self.builder.type_name().to_string();
                name.pop();
                self.builder.set_type_name(name);
            }
            SchemaCell::Name(row) => {
                let mut name = self.builder.fields()[row].name.clone();
                name.pop();
                self.builder.update_field(row, FieldAttribute::Name(name));
            }
            SchemaCell::Kind(_) | SchemaCell::Required(_) => {}
        }
    }

    /// Cycle the kind selector or flip the required checkbox
    pub fn cycle(&mut self, forward: bool) {
        match self.active_cell() {
            SchemaCell::Kind(row) => {
                let current = &self.builder.fields()[row].kind;
                let kind = if forward { current.next() } else { current.prev() };
                self.builder.update_field(row, FieldAttribute::Kind(kind));
            }
            SchemaCell::Required(row) => {
                let required = !self.builder.fields()[row].required;
                self.builder
                    .update_field(row, FieldAttribute::Required(required));
            }
            SchemaCell::TypeName | SchemaCell::Name(_) => {}
        }
    }

    /// Append a field and focus its name
    pub fn add_field(&mut self) {
        let row = self.builder.add_field().len() - 1;
        self.active_field_index = 1 + row * COLUMNS;
    }

    /// Remove the focused field row; returns whether a row was removed
    pub fn remove_active_field(&mut self) -> bool {
        let Some(row) = self.active_row() else {
            return false;
        };
        self.builder.remove_field(row);
        let remaining = self.builder.fields().len();
        self.active_field_index = if remaining == 0 {
            0
        } else {
            1 + row.min(remaining - 1) * COLUMNS
        };
        true
    }

    pub fn duplicate_names(&self) -> Vec<String> {
        self.builder.duplicate_names()
    }

    pub fn schema(&self) -> ContentTypeSchema {
        self.builder.build()
    }
}

impl Form for SchemaForm {
    fn field_count(&self) -> usize {
        1 + self.builder.fields().len() * COLUMNS
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }
}
