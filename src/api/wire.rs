//! JSON shapes exchanged with the content API

use crate::schema::{ContentTypeSchema, EntryPayload, FieldDefinition, FieldKind};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub schema: SchemaDto,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDto {
    #[serde(default)]
    pub fields: Vec<FieldDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDto {
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "nullable_kind")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// A null `type` reads like a missing one
fn nullable_kind<'de, D>(deserializer: D) -> Result<FieldKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FieldKind>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub content_type_id: i64,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

/// Body of entry create and update requests
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryBody<'a> {
    pub content_type_id: i64,
    pub data: &'a Map<String, Value>,
}

impl ContentTypeDto {
    /// Wire form of a schema; `required` is only included when asked for
    pub fn from_schema(schema: &ContentTypeSchema, send_required: bool) -> Self {
        Self {
            id: schema.id,
            name: schema.name.clone(),
            schema: SchemaDto {
                fields: schema
                    .fields
                    .iter()
                    .map(|f| FieldDto {
                        name: f.name.clone(),
                        kind: f.kind.clone(),
                        required: send_required.then_some(f.required),
                    })
                    .collect(),
            },
        }
    }
}

impl From<ContentTypeDto> for ContentTypeSchema {
    fn from(dto: ContentTypeDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            fields: dto
                .schema
                .fields
                .into_iter()
                .map(|f| FieldDefinition {
                    name: f.name,
                    kind: f.kind,
                    required: f.required.unwrap_or(false),
                })
                .collect(),
        }
    }
}

impl From<EntryDto> for EntryPayload {
    fn from(dto: EntryDto) -> Self {
        Self {
            id: dto.id,
            content_type_id: dto.content_type_id,
            data: dto.data.unwrap_or_default(),
        }
    }
}
