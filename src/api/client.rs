//! HTTP client for the content API
//!
//! Thin REST wrapper: every call maps the response status onto [`ApiError`]
//! and converts wire shapes into the schema model.

use super::error::ApiError;
use super::traits::ContentApi;
use super::wire::{ContentTypeDto, EntryBody, EntryDto};
use crate::schema::{ContentTypeId, ContentTypeSchema, EntryId, EntryPayload};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{Map, Value};

/// Default API address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Credentials handed to the client by whoever owns the login session
#[derive(Clone)]
pub struct AuthContext {
    token: String,
}

impl AuthContext {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext").field("token", &"***").finish()
    }
}

/// Client for the content type and entry endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Option<AuthContext>,
    send_required_flag: bool,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth: Option<AuthContext>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            send_required_flag: true,
        }
    }

    /// Whether field definitions are sent with their `required` flag
    pub fn with_required_flag(mut self, send: bool) -> Self {
        self.send_required_flag = send;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(auth) => request.bearer_auth(&auth.token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let response = self.authorize(request).send().await?;
        check_response(response, path).await
    }

    async fn fetch_entry(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<EntryPayload, ApiError> {
        let response = self.send(request, path).await?;
        let dto: EntryDto = response.json().await?;
        Ok(dto.into())
    }
}

/// Map a non-success response to an [`ApiError`]
async fn check_response(response: Response, path: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        tracing::debug!(path, status = status.as_u16(), "request succeeded");
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(path, %err, "error body unreadable");
            String::new()
        }
    };
    let message = error_message(status, &body);
    tracing::warn!(path, status = status.as_u16(), %message, "request failed");

    match status.as_u16() {
        404 => Err(ApiError::NotFound(path.to_string())),
        401 | 403 => Err(ApiError::Unauthorized(message)),
        code => Err(ApiError::Rejected {
            status: code,
            message,
        }),
    }
}

/// Message for a failed response; an empty or unread body gives the status reason
fn error_message(status: StatusCode, body: &str) -> String {
    let message = extract_error_message(body);
    if message.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        message
    }
}

/// Human-readable message from an error body
///
/// Tries `message`, `title` and `error` keys of a JSON body, then falls back
/// to the raw text.
fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["message", "title", "error"] {
            if let Some(text) = json.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    body.trim().to_string()
}

#[async_trait]
impl ContentApi for ApiClient {
    async fn list_content_types(&self) -> Result<Vec<ContentTypeSchema>, ApiError> {
        let path = "/content-types";
        let response = self.send(self.client.get(self.url(path)), path).await?;
        let dtos: Vec<ContentTypeDto> = response.json().await?;
        Ok(dtos.into_iter().map(ContentTypeSchema::from).collect())
    }

    async fn get_content_type(&self, id: ContentTypeId) -> Result<ContentTypeSchema, ApiError> {
        let path = format!("/content-types/{id}");
        let response = self.send(self.client.get(self.url(&path)), &path).await?;
        let dto: ContentTypeDto = response.json().await?;
        Ok(dto.into())
    }

    async fn create_content_type(
        &self,
        schema: &ContentTypeSchema,
    ) -> Result<ContentTypeSchema, ApiError> {
        let path = "/content-types";
        let body = ContentTypeDto::from_schema(schema, self.send_required_flag);
        tracing::info!(name = %schema.name, fields = schema.fields.len(), "creating content type");
        let request = self.client.post(self.url(path)).json(&body);
        let response = self.send(request, path).await?;
        let dto: ContentTypeDto = response.json().await?;
        Ok(dto.into())
    }

    async fn get_entry(&self, id: EntryId) -> Result<EntryPayload, ApiError> {
        let path = format!("/content-entries/{id}");
        let request = self.client.get(self.url(&path));
        self.fetch_entry(request, &path).await
    }

    async fn create_entry(
        &self,
        content_type_id: ContentTypeId,
        data: Map<String, Value>,
    ) -> Result<EntryPayload, ApiError> {
        let path = "/content-entries";
        let body = EntryBody {
            content_type_id,
            data: &data,
        };
        let request = self.client.post(self.url(path)).json(&body);
        self.fetch_entry(request, path).await
    }

    async fn update_entry(
        &self,
        id: EntryId,
        content_type_id: ContentTypeId,
        data: Map<String, Value>,
    ) -> Result<EntryPayload, ApiError> {
        let path = format!("/content-entries/{id}");
        let body = EntryBody {
            content_type_id,
            data: &data,
        };
        let request = self.client.put(self.url(&path)).json(&body);
        self.fetch_entry(request, &path).await
    }
}
