//! Entry sync controller
//!
//! Drives one edit session through
//! `Loading -> SchemaReady -> (EntryReady | SchemaOnlyReady) -> Submitting -> (Success | back to ready)`,
//! with `Failed` as the terminal state when the content type cannot be
//! fetched. The entry fetch is only issued after the schema fetch succeeds.
//!
//! Network work and state transitions are split: [`EntrySession`] holds the
//! session and its transitions, [`EntrySyncController`] performs the calls.
//! Callers that run calls on a background task can hand sessions and
//! [`SubmitRequest`]s across and apply the results when they come back.

use super::error::{FetchError, Resource, SubmitError};
use super::state::{
    hydrate_state, initialize_state, missing_required, serialize_for_submission, set_field_value,
    EditableEntryState,
};
use crate::api::{ApiError, ContentApi};
use crate::schema::{ContentTypeId, ContentTypeSchema, EntryId, EntryPayload, InputValue};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Where an edit session is in its lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    /// Fetching the content type
    Loading,
    /// Content type fetched; entry fetch (if any) not finished yet
    SchemaReady,
    /// Existing entry loaded into editable state
    EntryReady,
    /// Editing defaulted state: a new entry, or an existing entry that could
    /// not be fetched (`entry_error` is set)
    SchemaOnlyReady { entry_error: Option<FetchError> },
    /// Submission in flight
    Submitting,
    /// Saved; the editable state has been consumed
    Success(EntryPayload),
    /// Content type could not be fetched; nothing to edit
    Failed(FetchError),
}

impl SessionPhase {
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::EntryReady | Self::SchemaOnlyReady { .. })
    }
}

/// One create-or-edit session for a single entry
#[derive(Debug, Clone)]
pub struct EntrySession {
    id: Uuid,
    content_type_id: ContentTypeId,
    entry_id: Option<EntryId>,
    phase: SessionPhase,
    schema: Option<ContentTypeSchema>,
    state: Option<EditableEntryState>,
    /// Ready phase and state to return to if a submission fails
    pending: Option<(SessionPhase, EditableEntryState)>,
    last_error: Option<SubmitError>,
}

/// Data for one create or update call, detached from the session
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub session_id: Uuid,
    pub content_type_id: ContentTypeId,
    pub entry_id: Option<EntryId>,
    pub data: Map<String, Value>,
}

impl EntrySession {
    /// A session in `Loading`, editing `entry_id` or creating when `None`
    pub fn new(content_type_id: ContentTypeId, entry_id: Option<EntryId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content_type_id,
            entry_id,
            phase: SessionPhase::Loading,
            schema: None,
            state: None,
            pending: None,
            last_error: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn content_type_id(&self) -> ContentTypeId {
        self.content_type_id
    }

    pub fn entry_id(&self) -> Option<EntryId> {
        self.entry_id
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn schema(&self) -> Option<&ContentTypeSchema> {
        self.schema.as_ref()
    }

    pub fn state(&self) -> Option<&EditableEntryState> {
        self.state.as_ref()
    }

    /// Error of the most recent failed submission, cleared on the next one
    pub fn last_error(&self) -> Option<&SubmitError> {
        self.last_error.as_ref()
    }

    /// Blank required fields of the current state
    pub fn missing_required(&self) -> Vec<String> {
        match (&self.schema, &self.state) {
            (Some(schema), Some(state)) => missing_required(schema, state),
            _ => Vec::new(),
        }
    }

    fn schema_loaded(&mut self, schema: ContentTypeSchema) {
        let state = initialize_state(&schema);
        debug!(session = %self.id, fields = state.len(), "schema ready");
        self.state = Some(state);
        self.schema = Some(schema);
        self.phase = SessionPhase::SchemaReady;
    }

    fn schema_failed(&mut self, error: FetchError) {
        warn!(session = %self.id, %error, "content type unavailable");
        self.phase = SessionPhase::Failed(error);
    }

    fn entry_loaded(&mut self, payload: &EntryPayload) {
        if let Some(schema) = &self.schema {
            self.state = Some(hydrate_state(schema, payload));
            self.phase = SessionPhase::EntryReady;
        }
    }

    fn entry_degraded(&mut self, entry_error: Option<FetchError>) {
        if let Some(error) = &entry_error {
            warn!(session = %self.id, %error, "editing with defaults");
        }
        self.phase = SessionPhase::SchemaOnlyReady { entry_error };
    }

    /// Apply editor input to one field; ignored outside editable phases
    pub fn edit(&mut self, field_name: &str, input: InputValue) {
        if !self.phase.is_editable() {
            debug!(session = %self.id, field_name, "edit ignored, session not editable");
            return;
        }
        let Some(kind) = self
            .schema
            .as_ref()
            .and_then(|s| s.field(field_name))
            .map(|f| f.kind.clone())
        else {
            warn!(session = %self.id, field_name, "edit for unknown field ignored");
            return;
        };
        if let Some(state) = self.state.take() {
            self.state = Some(set_field_value(state, field_name, input, &kind));
        }
    }

    /// Serialize the state and move to `Submitting`
    ///
    /// With `enforce_required` set, blank required fields stop the submission
    /// before anything is sent.
    pub fn begin_submit(&mut self, enforce_required: bool) -> Result<SubmitRequest, SubmitError> {
        if !self.phase.is_editable() {
            return Err(SubmitError::NotEditable);
        }
        if enforce_required {
            let missing = self.missing_required();
            if !missing.is_empty() {
                let error = SubmitError::MissingRequired(missing);
                self.last_error = Some(error.clone());
                return Err(error);
            }
        }
        let Some(state) = self.state.take() else {
            return Err(SubmitError::NotEditable);
        };

        let ready = std::mem::replace(&mut self.phase, SessionPhase::Submitting);
        self.pending = Some((ready, state.clone()));
        self.last_error = None;
        info!(session = %self.id, entry_id = ?self.entry_id, "submitting entry");

        Ok(SubmitRequest {
            session_id: self.id,
            content_type_id: self.content_type_id,
            entry_id: self.entry_id,
            data: serialize_for_submission(state),
        })
    }

    /// Apply the outcome of a submission started by [`Self::begin_submit`]
    ///
    /// Success consumes the editable state. Failure restores the state and
    /// phase from before the submission so the user can retry.
    pub fn finish_submit(
        &mut self,
        result: Result<EntryPayload, ApiError>,
    ) -> Result<EntryPayload, SubmitError> {
        let Some((ready, snapshot)) = self.pending.take() else {
            return Err(SubmitError::NotEditable);
        };
        match result {
            Ok(saved) => {
                info!(session = %self.id, entry_id = ?saved.id, "entry saved");
                self.phase = SessionPhase::Success(saved.clone());
                self.state = None;
                Ok(saved)
            }
            Err(err) => {
                warn!(session = %self.id, error = %err, "entry save failed");
                let error = SubmitError::Rejected(err);
                self.phase = ready;
                self.state = Some(snapshot);
                self.last_error = Some(error.clone());
                Err(error)
            }
        }
    }
}

/// Performs the network side of edit sessions
#[derive(Clone)]
pub struct EntrySyncController {
    api: Arc<dyn ContentApi>,
}

impl EntrySyncController {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self { api }
    }

    /// Fetch the schema, then the entry when editing, and build the state
    pub async fn load(&self, mut session: EntrySession) -> EntrySession {
        let content_type_id = session.content_type_id;
        debug!(session = %session.id, content_type_id, "loading content type");

        match self.api.get_content_type(content_type_id).await {
            Ok(schema) => session.schema_loaded(schema),
            Err(err) => {
                session.schema_failed(FetchError::new(Resource::ContentType, content_type_id, err));
                return session;
            }
        }

        match session.entry_id {
            Some(entry_id) => match self.api.get_entry(entry_id).await {
                Ok(payload) => session.entry_loaded(&payload),
                Err(err) => {
                    session.entry_degraded(Some(FetchError::new(Resource::Entry, entry_id, err)))
                }
            },
            None => session.entry_degraded(None),
        }
        session
    }

    /// Create or update, depending on whether the request names an entry
    pub async fn submit(&self, request: SubmitRequest) -> Result<EntryPayload, ApiError> {
        match request.entry_id {
            Some(entry_id) => {
                self.api
                    .update_entry(entry_id, request.content_type_id, request.data)
                    .await
            }
            None => {
                self.api
                    .create_entry(request.content_type_id, request.data)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockContentApi;
    use crate::schema::{FieldDefinition, FieldKind, FieldValue};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Submit a session in place and apply the outcome, as the app does
    async fn submit_session(
        controller: &EntrySyncController,
        session: &mut EntrySession,
        enforce_required: bool,
    ) -> Result<EntryPayload, SubmitError> {
        let request = session.begin_submit(enforce_required)?;
        let result = controller.submit(request).await;
        session.finish_submit(result)
    }

    fn article() -> ContentTypeSchema {
        ContentTypeSchema {
            id: Some(1),
            name: "Article".into(),
            fields: vec![
                FieldDefinition::new("title", FieldKind::Text).required(),
                FieldDefinition::new("views", FieldKind::Number),
                FieldDefinition::new("featured", FieldKind::Boolean),
            ],
        }
    }

    fn stored(id: EntryId, data: Value) -> EntryPayload {
        EntryPayload {
            id: Some(id),
            content_type_id: 1,
            data: data.as_object().cloned().unwrap_or_default(),
        }
    }

    fn controller(mock: MockContentApi) -> EntrySyncController {
        EntrySyncController::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_new_entry_loads_defaulted_state() {
        let mut mock = MockContentApi::new();
        mock.expect_get_content_type()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(article()));
        mock.expect_get_entry().never();

        let session = controller(mock).load(EntrySession::new(1, None)).await;

        assert_eq!(session.phase(), &SessionPhase::SchemaOnlyReady { entry_error: None });
        let state = session.state().unwrap();
        assert_eq!(state.get("views"), Some(&FieldValue::Number(0.0)));
        assert_eq!(state.get("featured"), Some(&FieldValue::Boolean(false)));
    }

    #[tokio::test]
    async fn test_existing_entry_hydrates_after_schema() {
        let mut mock = MockContentApi::new();
        mock.expect_get_content_type().returning(|_| Ok(article()));
        mock.expect_get_entry()
            .with(eq(9))
            .times(1)
            .returning(|id| Ok(stored(id, json!({"title": "Hi", "views": "12", "legacy": 1}))));

        let session = controller(mock).load(EntrySession::new(1, Some(9))).await;

        assert_eq!(session.phase(), &SessionPhase::EntryReady);
        let state = session.state().unwrap();
        assert_eq!(state.get("title"), Some(&FieldValue::Text("Hi".into())));
        assert_eq!(state.get("views"), Some(&FieldValue::Number(12.0)));
        assert_eq!(state.get("legacy"), None);
    }

    #[tokio::test]
    async fn test_schema_not_found_is_terminal() {
        let mut mock = MockContentApi::new();
        mock.expect_get_content_type()
            .returning(|id| Err(ApiError::NotFound(format!("/content-types/{id}"))));
        mock.expect_get_entry().never();

        let mut session = controller(mock).load(EntrySession::new(4, Some(2))).await;

        match session.phase() {
            SessionPhase::Failed(err) => {
                assert!(err.is_not_found());
                assert_eq!(err.resource, Resource::ContentType);
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(session.state().is_none());
        assert_eq!(session.begin_submit(false), Err(SubmitError::NotEditable));
    }

    #[tokio::test]
    async fn test_schema_transport_error_is_fetch_error() {
        let mut mock = MockContentApi::new();
        mock.expect_get_content_type()
            .returning(|_| Err(ApiError::Transport("connection refused".into())));

        let session = controller(mock).load(EntrySession::new(4, None)).await;

        match session.phase() {
            SessionPhase::Failed(err) => assert!(!err.is_not_found()),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_entry_fetch_failure_degrades_to_defaults() {
        let mut mock = MockContentApi::new();
        mock.expect_get_content_type().returning(|_| Ok(article()));
        mock.expect_get_entry()
            .returning(|_| Err(ApiError::Transport("timeout".into())));

        let session = controller(mock).load(EntrySession::new(1, Some(5))).await;

        match session.phase() {
            SessionPhase::SchemaOnlyReady {
                entry_error: Some(err),
            } => assert_eq!(err.resource, Resource::Entry),
            other => panic!("expected degraded session, got {other:?}"),
        }
        assert_eq!(
            session.state().and_then(|s| s.get("title")),
            Some(&FieldValue::Text(String::new()))
        );
        assert!(session.phase().is_editable());
    }

    #[tokio::test]
    async fn test_create_submits_serialized_state() {
        let mut mock = MockContentApi::new();
        mock.expect_get_content_type().returning(|_| Ok(article()));
        mock.expect_update_entry().never();
        mock.expect_create_entry()
            .withf(|content_type_id, data| {
                *content_type_id == 1
                    && Value::Object(data.clone())
                        == json!({"title": "Launch", "views": 3, "featured": true})
            })
            .times(1)
            .returning(|_, data| {
                Ok(EntryPayload {
                    id: Some(77),
                    content_type_id: 1,
                    data,
                })
            });

        let controller = controller(mock);
        let mut session = controller.load(EntrySession::new(1, None)).await;
        session.edit("title", InputValue::Text("Launch".into()));
        session.edit("views", InputValue::Text("3".into()));
        session.edit("featured", InputValue::Toggle(true));

        let saved = submit_session(&controller, &mut session, false).await.unwrap();

        assert_eq!(saved.id, Some(77));
        assert!(matches!(session.phase(), SessionPhase::Success(_)));
        assert!(session.state().is_none());
    }

    #[tokio::test]
    async fn test_edit_submits_update() {
        let mut mock = MockContentApi::new();
        mock.expect_get_content_type().returning(|_| Ok(article()));
        mock.expect_get_entry()
            .returning(|id| Ok(stored(id, json!({"title": "Old", "views": 1, "featured": false}))));
        mock.expect_create_entry().never();
        mock.expect_update_entry()
            .withf(|id, content_type_id, data| {
                *id == 9 && *content_type_id == 1 && data.get("title") == Some(&json!("New"))
            })
            .times(1)
            .returning(|id, content_type_id, data| {
                Ok(EntryPayload {
                    id: Some(id),
                    content_type_id,
                    data,
                })
            });

        let controller = controller(mock);
        let mut session = controller.load(EntrySession::new(1, Some(9))).await;
        session.edit("title", InputValue::Text("New".into()));

        let saved = submit_session(&controller, &mut session, false).await.unwrap();
        assert_eq!(saved.id, Some(9));
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_edits_for_retry() {
        let mut mock = MockContentApi::new();
        mock.expect_get_content_type().returning(|_| Ok(article()));
        let mut attempts = 0;
        mock.expect_create_entry().times(2).returning(move |_, data| {
            attempts += 1;
            if attempts == 1 {
                Err(ApiError::Rejected {
                    status: 500,
                    message: "boom".into(),
                })
            } else {
                Ok(EntryPayload {
                    id: Some(1),
                    content_type_id: 1,
                    data,
                })
            }
        });

        let controller = controller(mock);
        let mut session = controller.load(EntrySession::new(1, None)).await;
        session.edit("title", InputValue::Text("Kept".into()));

        let first = submit_session(&controller, &mut session, false).await;
        assert!(matches!(first, Err(SubmitError::Rejected(_))));
        assert_eq!(session.phase(), &SessionPhase::SchemaOnlyReady { entry_error: None });
        assert_eq!(
            session.state().and_then(|s| s.get("title")),
            Some(&FieldValue::Text("Kept".into()))
        );
        assert!(session.last_error().is_some());

        let second = submit_session(&controller, &mut session, false).await;
        assert_eq!(second.map(|p| p.data.get("title").cloned()), Ok(Some(json!("Kept"))));
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn test_enforced_required_blocks_without_calling_backend() {
        let mut mock = MockContentApi::new();
        mock.expect_get_content_type().returning(|_| Ok(article()));
        mock.expect_create_entry().never();

        let controller = controller(mock);
        let mut session = controller.load(EntrySession::new(1, None)).await;

        let result = submit_session(&controller, &mut session, true).await;
        assert_eq!(result, Err(SubmitError::MissingRequired(vec!["title".into()])));
        assert!(session.phase().is_editable());
    }

    #[tokio::test]
    async fn test_required_not_enforced_by_default() {
        let mut mock = MockContentApi::new();
        mock.expect_get_content_type().returning(|_| Ok(article()));
        mock.expect_create_entry().times(1).returning(|content_type_id, data| {
            Ok(EntryPayload {
                id: Some(2),
                content_type_id,
                data,
            })
        });

        let controller = controller(mock);
        let mut session = controller.load(EntrySession::new(1, None)).await;
        assert_eq!(session.missing_required(), vec!["title".to_string()]);
        assert!(submit_session(&controller, &mut session, false).await.is_ok());
    }

    #[test]
    fn test_second_submit_while_in_flight_is_refused() {
        let mut mock = MockContentApi::new();
        mock.expect_get_content_type().returning(|_| Ok(article()));
        let mut session =
            tokio_test::block_on(controller(mock).load(EntrySession::new(1, None)));

        let request = session.begin_submit(false).unwrap();
        assert_eq!(request.session_id, session.id());
        assert_eq!(session.phase(), &SessionPhase::Submitting);
        assert_eq!(session.begin_submit(false), Err(SubmitError::NotEditable));

        session.edit("title", InputValue::Text("late".into()));
        assert!(session.state().is_none());
    }

    #[test]
    fn test_edits_ignored_while_loading() {
        let mut session = EntrySession::new(1, None);
        session.edit("title", InputValue::Text("x".into()));
        assert_eq!(session.phase(), &SessionPhase::Loading);
        assert!(session.state().is_none());
    }

    #[test]
    fn test_finish_without_begin_is_refused() {
        let mut session = EntrySession::new(1, None);
        let result = session.finish_submit(Ok(EntryPayload::default()));
        assert_eq!(result, Err(SubmitError::NotEditable));
    }
}
