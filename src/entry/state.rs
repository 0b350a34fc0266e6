//! Entry state engine
//!
//! Maps a schema plus an optional stored payload to editable state, applies
//! field-level edits, and turns the state back into a payload mapping. The
//! functions here transform state and never hold on to it.

use crate::schema::{
    coerce_from_input, coerce_from_storage, default_value, ContentTypeSchema, EntryPayload,
    FieldKind, FieldValue, InputValue,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One canonical value per field of the schema that produced it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditableEntryState {
    values: HashMap<String, FieldValue>,
}

impl EditableEntryState {
    pub fn get(&self, field_name: &str) -> Option<&FieldValue> {
        self.values.get(field_name)
    }

    /// Number of fields held
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Defaulted state for a new entry
pub fn initialize_state(schema: &ContentTypeSchema) -> EditableEntryState {
    let values = schema
        .fields
        .iter()
        .map(|field| (field.name.clone(), default_value(&field.kind)))
        .collect();
    EditableEntryState { values }
}

/// State for an existing entry
///
/// Schema fields missing from the payload get their kind's default. Payload
/// keys the schema does not declare are left out of the state.
pub fn hydrate_state(schema: &ContentTypeSchema, payload: &EntryPayload) -> EditableEntryState {
    let values: HashMap<String, FieldValue> = schema
        .fields
        .iter()
        .map(|field| {
            let value = coerce_from_storage(&field.kind, payload.data.get(&field.name));
            (field.name.clone(), value)
        })
        .collect();

    let dropped = payload
        .data
        .keys()
        .filter(|key| !values.contains_key(key.as_str()))
        .count();
    if dropped > 0 {
        tracing::debug!(
            entry_id = ?payload.id,
            dropped,
            "stored keys not in schema left out of editable state"
        );
    }

    EditableEntryState { values }
}

/// Replace one field's value with coerced editor input
///
/// `field_name` must belong to the schema the state was built from; an
/// unknown name leaves the state unchanged.
pub fn set_field_value(
    mut state: EditableEntryState,
    field_name: &str,
    input: InputValue,
    kind: &FieldKind,
) -> EditableEntryState {
    match state.values.get_mut(field_name) {
        Some(slot) => {
            let value = coerce_from_input(kind, input);
            debug_assert!(value.conforms_to(kind), "{value:?} is not a {kind} value");
            *slot = value;
        }
        None => tracing::warn!(field_name, "edit for a field outside the schema ignored"),
    }
    state
}

/// Payload data for submission; consumes the state
pub fn serialize_for_submission(state: EditableEntryState) -> Map<String, Value> {
    state
        .values
        .into_iter()
        .map(|(name, value)| {
            let json = value.to_json();
            (name, json)
        })
        .collect()
}

/// Required fields whose value is blank, in schema order
pub fn missing_required(schema: &ContentTypeSchema, state: &EditableEntryState) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for field in schema.fields.iter().filter(|f| f.required) {
        let blank = state.get(&field.name).map_or(true, FieldValue::is_blank);
        if blank && !missing.contains(&field.name) {
            missing.push(field.name.clone());
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDefinition;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema(fields: Vec<FieldDefinition>) -> ContentTypeSchema {
        ContentTypeSchema {
            id: Some(7),
            name: "Article".into(),
            fields,
        }
    }

    fn every_kind() -> ContentTypeSchema {
        schema(vec![
            FieldDefinition::new("title", FieldKind::Text),
            FieldDefinition::new("views", FieldKind::Number),
            FieldDefinition::new("rating", FieldKind::Number),
            FieldDefinition::new("published", FieldKind::Boolean),
            FieldDefinition::new("publishedAt", FieldKind::Date),
            FieldDefinition::new("body", FieldKind::RichText),
            FieldDefinition::new("location", FieldKind::Unknown("geo".into())),
        ])
    }

    fn payload(data: Value) -> EntryPayload {
        EntryPayload {
            id: Some(3),
            content_type_id: 7,
            data: data.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn test_initialize_uses_kind_defaults() {
        let state = initialize_state(&every_kind());
        assert_eq!(state.len(), 7);
        assert_eq!(state.get("title"), Some(&FieldValue::Text(String::new())));
        assert_eq!(state.get("views"), Some(&FieldValue::Number(0.0)));
        assert_eq!(state.get("published"), Some(&FieldValue::Boolean(false)));
        assert_eq!(state.get("publishedAt"), Some(&FieldValue::Date(String::new())));
    }

    #[test]
    fn test_canonical_payload_round_trips() {
        let data = json!({
            "title": "Hello",
            "views": 42,
            "rating": 4.5,
            "published": true,
            "publishedAt": "2024-03-05",
            "body": "Long\ntext",
            "location": "52.1,4.3"
        });
        let state = hydrate_state(&every_kind(), &payload(data.clone()));
        let serialized = serialize_for_submission(state);
        assert_eq!(Value::Object(serialized), data);
    }

    #[test]
    fn test_missing_key_hydrates_to_default() {
        let schema = schema(vec![FieldDefinition::new("active", FieldKind::Boolean)]);
        let state = hydrate_state(&schema, &payload(json!({})));
        assert_eq!(state.get("active"), Some(&FieldValue::Boolean(false)));
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let schema = schema(vec![FieldDefinition::new("title", FieldKind::Text)]);
        let state = hydrate_state(&schema, &payload(json!({"title": "A", "legacy": "X"})));
        assert_eq!(
            Value::Object(serialize_for_submission(state)),
            json!({"title": "A"})
        );
    }

    #[test]
    fn test_hydrate_truncates_stored_timestamps() {
        let schema = schema(vec![FieldDefinition::new("publishedAt", FieldKind::Date)]);
        let state = hydrate_state(
            &schema,
            &payload(json!({"publishedAt": "2024-03-05T10:00:00Z"})),
        );
        assert_eq!(
            state.get("publishedAt"),
            Some(&FieldValue::Date("2024-03-05".into()))
        );
    }

    #[test]
    fn test_empty_schema_yields_empty_state_and_payload() {
        let state = hydrate_state(&schema(vec![]), &payload(json!({"stray": 1})));
        assert_eq!(state.len(), 0);
        assert!(serialize_for_submission(state).is_empty());
        assert_eq!(initialize_state(&schema(vec![])).len(), 0);
    }

    #[test]
    fn test_set_field_value_coerces_input() {
        let schema = every_kind();
        let state = initialize_state(&schema);
        let state = set_field_value(state, "views", InputValue::Text("12".into()), &FieldKind::Number);
        let state = set_field_value(state, "views", InputValue::Text("12x".into()), &FieldKind::Number);
        let state = set_field_value(state, "published", InputValue::Toggle(true), &FieldKind::Boolean);
        assert_eq!(state.get("views"), Some(&FieldValue::Number(12.0)));
        assert_eq!(state.get("published"), Some(&FieldValue::Boolean(true)));
    }

    #[test]
    fn test_set_field_value_ignores_unknown_field() {
        let schema = every_kind();
        let before = initialize_state(&schema);
        let after = set_field_value(
            before.clone(),
            "nope",
            InputValue::Text("x".into()),
            &FieldKind::Text,
        );
        assert_eq!(before, after);
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let schema = schema(vec![
            FieldDefinition::new("slug", FieldKind::Text),
            FieldDefinition::new("slug", FieldKind::Number),
        ]);
        let state = initialize_state(&schema);
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("slug"), Some(&FieldValue::Number(0.0)));
    }

    #[test]
    fn test_missing_required_lists_blank_fields() {
        let schema = schema(vec![
            FieldDefinition::new("title", FieldKind::Text).required(),
            FieldDefinition::new("count", FieldKind::Number).required(),
            FieldDefinition::new("due", FieldKind::Date).required(),
            FieldDefinition::new("notes", FieldKind::RichText),
        ]);
        let state = initialize_state(&schema);
        assert_eq!(missing_required(&schema, &state), vec!["title", "due"]);

        let state = set_field_value(state, "title", InputValue::Text("Hi".into()), &FieldKind::Text);
        assert_eq!(missing_required(&schema, &state), vec!["due"]);
    }
}
