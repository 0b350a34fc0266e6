//! Content type and entry value types

use super::kind::FieldKind;
use serde_json::{Map, Value};

/// Backend identifier of a content type
pub type ContentTypeId = i64;

/// Backend identifier of an entry
pub type EntryId = i64;

/// One field of a content type schema
///
/// `name` is both the label shown to editors and the key under which the
/// value is stored in an entry's data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldDefinition {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Human label derived from the storage key ("publishedAt" -> "Published At")
    pub fn label(&self) -> String {
        display_label(&self.name)
    }
}

/// A content type: a named, ordered list of field definitions
///
/// Field order is the display and tab order of the entry editor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentTypeSchema {
    /// Present once the schema has been persisted
    pub id: Option<ContentTypeId>,
    /// Type name; doubles as the API resource name
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

impl ContentTypeSchema {
    /// Look up a field by storage key
    ///
    /// With duplicate names the last definition wins, matching how values
    /// land in the entry mapping.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().rev().find(|f| f.name == name)
    }
}

/// A stored entry as exchanged with the backend
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryPayload {
    pub id: Option<EntryId>,
    pub content_type_id: ContentTypeId,
    /// Field name to untyped value; may hold keys the schema no longer
    /// declares and lack keys it does
    pub data: Map<String, Value>,
}

/// Split a camelCase key into capitalized words
pub fn display_label(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
