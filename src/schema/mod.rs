//! Content type schemas: field kinds, the schema model and its builder

mod builder;
mod kind;
mod model;

pub use builder::{FieldAttribute, SchemaBuilder};
pub use kind::{
    coerce_from_input, coerce_from_storage, default_value, EditorKind, FieldKind, FieldValue,
    InputValue,
};
pub use model::{ContentTypeId, ContentTypeSchema, EntryId, EntryPayload, FieldDefinition};
