//! Schema builder: the only mutation path for a content type being authored

use super::kind::FieldKind;
use super::model::{ContentTypeSchema, FieldDefinition};
use std::collections::HashSet;

/// One attribute of a field definition, with its new value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldAttribute {
    Name(String),
    Kind(FieldKind),
    Required(bool),
}

/// Mutable editor over a content type schema
///
/// Operations never validate names: empty and duplicate names are allowed
/// while authoring. [`SchemaBuilder::duplicate_names`] reports duplicates
/// for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaBuilder {
    type_name: String,
    fields: Vec<FieldDefinition>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn set_type_name(&mut self, name: impl Into<String>) {
        self.type_name = name.into();
    }

    /// Current field snapshot
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Append an unnamed, optional text field
    pub fn add_field(&mut self) -> &[FieldDefinition] {
        self.fields.push(FieldDefinition::default());
        &self.fields
    }

    /// Replace one attribute of the field at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn update_field(&mut self, index: usize, attribute: FieldAttribute) -> &[FieldDefinition] {
        let field = &mut self.fields[index];
        match attribute {
            FieldAttribute::Name(name) => field.name = name,
            FieldAttribute::Kind(kind) => field.kind = kind,
            FieldAttribute::Required(required) => field.required = required,
        }
        &self.fields
    }

    /// Remove the field at `index`, shifting later fields down by one
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_field(&mut self, index: usize) -> &[FieldDefinition] {
        self.fields.remove(index);
        &self.fields
    }

    /// Names used by more than one field, in first-seen order
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) && !duplicates.contains(&field.name) {
                duplicates.push(field.name.clone());
            }
        }
        duplicates
    }

    /// Snapshot of the schema being authored
    pub fn build(&self) -> ContentTypeSchema {
        build_schema(&self.type_name, &self.fields)
    }
}

/// Assemble an unpersisted schema from a type name and fields, as-is
pub fn build_schema(type_name: &str, fields: &[FieldDefinition]) -> ContentTypeSchema {
    ContentTypeSchema {
        id: None,
        name: type_name.to_string(),
        fields: fields.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(builder: &mut SchemaBuilder, names: &[&str]) {
        for name in names {
            let index = builder.add_field().len() - 1;
            builder.update_field(index, FieldAttribute::Name(name.to_string()));
        }
    }

    #[test]
    fn test_add_field_defaults() {
        let mut builder = SchemaBuilder::new();
        let fields = builder.add_field();
        assert_eq!(fields, &[FieldDefinition::new("", FieldKind::Text)]);
    }

    #[test]
    fn test_update_each_attribute() {
        let mut builder = SchemaBuilder::new();
        builder.add_field();
        builder.update_field(0, FieldAttribute::Name("price".into()));
        builder.update_field(0, FieldAttribute::Kind(FieldKind::Number));
        let fields = builder.update_field(0, FieldAttribute::Required(true));
        assert_eq!(
            fields,
            &[FieldDefinition::new("price", FieldKind::Number).required()]
        );
    }

    #[test]
    fn test_remove_then_update_targets_shifted_field() {
        let mut builder = SchemaBuilder::new();
        named(&mut builder, &["a", "b", "c"]);

        builder.remove_field(1);
        let fields = builder.update_field(1, FieldAttribute::Kind(FieldKind::Date));

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], FieldDefinition::new("a", FieldKind::Text));
        assert_eq!(fields[1], FieldDefinition::new("c", FieldKind::Date));
    }

    #[test]
    fn test_long_operation_sequence_never_panics_with_valid_indices() {
        let mut builder = SchemaBuilder::new();
        for step in 0..50usize {
            let len = builder.fields().len();
            match step % 5 {
                0 | 1 => {
                    builder.add_field();
                }
                2 if len > 0 => {
                    builder.update_field(step % len, FieldAttribute::Name(format!("f{step}")));
                }
                3 if len > 0 => {
                    builder.update_field(len - 1, FieldAttribute::Kind(FieldKind::Boolean));
                }
                4 if len > 1 => {
                    builder.remove_field(0);
                }
                _ => {}
            }
        }
        assert!(!builder.fields().is_empty());
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_update_is_a_programming_error() {
        let mut builder = SchemaBuilder::new();
        builder.update_field(0, FieldAttribute::Required(true));
    }

    #[test]
    fn test_duplicate_names_reported_not_rejected() {
        let mut builder = SchemaBuilder::new();
        named(&mut builder, &["title", "body", "title", "title"]);
        assert_eq!(builder.duplicate_names(), vec!["title".to_string()]);
        assert_eq!(builder.build().fields.len(), 4);
    }

    #[test]
    fn test_build_copies_name_and_order() {
        let mut builder = SchemaBuilder::new();
        builder.set_type_name("Blog Post");
        named(&mut builder, &["title", "body"]);
        builder.update_field(1, FieldAttribute::Kind(FieldKind::RichText));

        let schema = builder.build();
        assert_eq!(schema.id, None);
        assert_eq!(schema.name, "Blog Post");
        assert_eq!(
            schema.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            vec!["title", "body"]
        );
        assert_eq!(schema, build_schema("Blog Post", builder.fields()));
    }

    #[test]
    fn test_build_without_name_is_allowed() {
        let schema = build_schema("", &[]);
        assert!(schema.name.is_empty());
        assert!(schema.fields.is_empty());
    }
}
