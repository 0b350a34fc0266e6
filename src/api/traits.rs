//! Trait abstraction for the content API to enable mocking in tests

use super::error::ApiError;
use crate::schema::{ContentTypeId, ContentTypeSchema, EntryId, EntryPayload};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Persistence collaborator for content types and entries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// List all content types
    async fn list_content_types(&self) -> Result<Vec<ContentTypeSchema>, ApiError>;

    /// Fetch one content type
    async fn get_content_type(&self, id: ContentTypeId) -> Result<ContentTypeSchema, ApiError>;

    /// Persist a newly authored content type
    async fn create_content_type(
        &self,
        schema: &ContentTypeSchema,
    ) -> Result<ContentTypeSchema, ApiError>;

    /// Fetch one stored entry
    async fn get_entry(&self, id: EntryId) -> Result<EntryPayload, ApiError>;

    /// Create an entry
    async fn create_entry(
        &self,
        content_type_id: ContentTypeId,
        data: Map<String, Value>,
    ) -> Result<EntryPayload, ApiError>;

    /// Replace the data of an existing entry
    async fn update_entry(
        &self,
        id: EntryId,
        content_type_id: ContentTypeId,
        data: Map<String, Value>,
    ) -> Result<EntryPayload, ApiError>;
}
