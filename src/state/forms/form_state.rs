//! Form navigation and the entry form

use super::field::FormField;
use crate::entry::EditableEntryState;
use crate::schema::ContentTypeSchema;
use std::collections::HashSet;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Editing surface of one entry: one row per distinct field name, in
/// schema order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryForm {
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl EntryForm {
    /// Rows for `schema`, filled from `state` when one is available
    ///
    /// A duplicated name gets a single row at its first position, shaped
    /// by its last definition.
    pub fn new(schema: &ContentTypeSchema, state: Option<&EditableEntryState>) -> Self {
        let mut seen = HashSet::new();
        let fields = schema
            .fields
            .iter()
            .filter(|f| seen.insert(f.name.as_str()))
            .filter_map(|f| schema.field(&f.name))
            .map(|def| FormField::for_definition(def, state.and_then(|s| s.get(&def.name))))
            .collect();
        Self {
            fields,
            active_field_index: 0,
        }
    }

    pub fn active(&self) -> Option<&FormField> {
        self.fields.get(self.active_field_index)
    }

    pub fn active_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.active().is_some_and(FormField::is_multiline)
    }
}

impl Form for EntryForm {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
}
