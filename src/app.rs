//! Application state and core logic

use crate::api::{ApiError, ContentApi};
use crate::config::AppConfig;
use crate::entry::{EntrySession, EntrySyncController, SessionPhase, SubmitError};
use crate::schema::{ContentTypeId, ContentTypeSchema, EntryId, EntryPayload};
use crate::state::{AppState, EntryForm, Form, SchemaCell, SchemaForm, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Window in which a second Ctrl+C quits
const QUIT_WINDOW: Duration = Duration::from_millis(800);

/// Outcome of background work, delivered back to the UI loop
#[derive(Debug)]
pub enum AppEvent {
    ContentTypesLoaded(Result<Vec<ContentTypeSchema>, ApiError>),
    SchemaSaved {
        save_id: Uuid,
        result: Result<ContentTypeSchema, ApiError>,
    },
    SessionLoaded(EntrySession),
    EntrySubmitted {
        session_id: Uuid,
        result: Result<EntryPayload, ApiError>,
    },
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pub config: AppConfig,
    api: Arc<dyn ContentApi>,
    sync: EntrySyncController,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Whether the app should quit
    quit: bool,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    pub fn new(api: Arc<dyn ContentApi>, config: AppConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            config,
            sync: EntrySyncController::new(api.clone()),
            api,
            events_tx,
            events_rx,
            quit: false,
            status_message: None,
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Id of the edit session whose results are still wanted
    fn live_session_id(&self) -> Option<Uuid> {
        self.state.session.as_ref().map(EntrySession::id)
    }

    /// Apply every finished background result; returns how many were applied
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ContentTypesLoaded(Ok(content_types)) => {
                tracing::debug!(count = content_types.len(), "content types loaded");
                self.state.set_content_types(content_types);
            }
            AppEvent::ContentTypesLoaded(Err(e)) => {
                self.state.content_types_loading = false;
                self.push_error(format!("Failed to load content types: {e}"));
            }
            AppEvent::SchemaSaved { save_id, result } => self.finish_schema_save(save_id, result),
            AppEvent::SessionLoaded(session) => self.finish_session_load(session),
            AppEvent::EntrySubmitted { session_id, result } => {
                self.finish_entry_submit(session_id, result)
            }
        }
    }

    /// Start (re)loading the content type list
    pub fn reload_content_types(&mut self) {
        self.state.content_types_loading = true;
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.list_content_types().await;
            let _ = tx.send(AppEvent::ContentTypesLoaded(result));
        });
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c();
            return Ok(());
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::ContentTypes => self.handle_content_types_key(key),
            View::SchemaBuilder => self.handle_schema_builder_key(key),
            View::EntryEditor => self.handle_entry_editor_key(key),
        }
        Ok(())
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        match self.last_ctrl_c {
            Some(prev) if now.duration_since(prev) <= QUIT_WINDOW => self.quit = true,
            _ => {
                self.last_ctrl_c = Some(now);
                self.status_message = Some("Press Ctrl+C again to quit".to_string());
            }
        }
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        tracing::debug!(from = ?self.state.current_view, to = ?view, "navigate");
        self.state.current_view = view;
    }

    /// Handle keys in the content type list
    fn handle_content_types_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.move_selection_down(self.state.content_types.len())
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('r') => self.reload_content_types(),
            KeyCode::Char('n') => self.open_schema_builder(),
            KeyCode::Enter => {
                let Some(content_type) = self.state.selected_content_type() else {
                    return;
                };
                match content_type.id {
                    Some(id) => self.open_entry_editor(id, None),
                    None => self.push_error("Content type has no id"),
                }
            }
            _ => {}
        }
    }

    /// Start authoring a new content type
    pub fn open_schema_builder(&mut self) {
        self.state.schema_form = SchemaForm::new();
        self.state.schema_save = None;
        self.navigate(View::SchemaBuilder);
    }

    fn handle_schema_builder_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let form = &mut self.state.schema_form;
        match key.code {
            KeyCode::Esc => self.navigate(View::ContentTypes),
            KeyCode::Char('s') if ctrl => self.save_schema(),
            KeyCode::Char('w') if key.modifiers.contains(crate::platform::ALT_SAVE_MODIFIER) => {
                self.save_schema()
            }
            KeyCode::Char('a') if ctrl => form.add_field(),
            KeyCode::Char('d') if ctrl => {
                form.remove_active_field();
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            KeyCode::Left => form.cycle(false),
            KeyCode::Right => form.cycle(true),
            KeyCode::Char(' ') | KeyCode::Enter if !form.is_text_cell() => form.cycle(true),
            KeyCode::Enter => form.next_field(),
            KeyCode::Char(c) if !ctrl => form.input_char(c),
            KeyCode::Backspace => form.backspace(),
            _ => {}
        }
    }

    /// Persist the schema being authored
    fn save_schema(&mut self) {
        if self.state.schema_saving() {
            return;
        }
        let schema = self.state.schema_form.schema();
        let duplicates = self.state.schema_form.duplicate_names();
        if !duplicates.is_empty() {
            tracing::warn!(?duplicates, "saving content type with duplicate field names");
        }
        tracing::info!(name = %schema.name, fields = schema.fields.len(), "saving content type");

        let save_id = Uuid::new_v4();
        self.state.schema_save = Some(save_id);
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.create_content_type(&schema).await;
            let _ = tx.send(AppEvent::SchemaSaved { save_id, result });
        });
    }

    fn finish_schema_save(&mut self, save_id: Uuid, result: Result<ContentTypeSchema, ApiError>) {
        if self.state.schema_save != Some(save_id) {
            // The builder that issued this save was discarded; leave the open one alone
            tracing::debug!(save = %save_id, "schema save finished for a closed builder");
            match result {
                Ok(created) => {
                    self.status_message = Some(format!("Content type '{}' created", created.name));
                    self.reload_content_types();
                }
                Err(e) => self.push_error(format!("Failed to create content type: {e}")),
            }
            return;
        }
        self.state.schema_save = None;
        match result {
            Ok(created) => {
                self.status_message = Some(format!("Content type '{}' created", created.name));
                self.state.schema_form = SchemaForm::new();
                if self.state.current_view == View::SchemaBuilder {
                    self.navigate(View::ContentTypes);
                }
                self.reload_content_types();
            }
            Err(e) => self.push_error(format!("Failed to create content type: {e}")),
        }
    }

    /// Open the entry editor and start loading its session
    ///
    /// Any previous session is torn down; its outstanding results will be
    /// ignored when they arrive.
    pub fn open_entry_editor(&mut self, content_type_id: ContentTypeId, entry_id: Option<EntryId>) {
        let session = EntrySession::new(content_type_id, entry_id);
        tracing::info!(session = %session.id(), content_type_id, ?entry_id, "opening entry editor");

        self.state.close_session();
        self.state.session = Some(session.clone());
        self.navigate(View::EntryEditor);

        let sync = self.sync.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let loaded = sync.load(session).await;
            let _ = tx.send(AppEvent::SessionLoaded(loaded));
        });
    }

    /// Leave the entry editor, discarding the session
    pub fn close_entry_editor(&mut self) {
        if let Some(session) = &self.state.session {
            tracing::debug!(session = %session.id(), "entry editor closed");
        }
        self.state.close_session();
        self.navigate(View::ContentTypes);
    }

    fn finish_session_load(&mut self, session: EntrySession) {
        if self.live_session_id() != Some(session.id()) {
            tracing::debug!(session = %session.id(), "dropping load result of closed session");
            return;
        }
        self.state.entry_form = session
            .schema()
            .map(|schema| EntryForm::new(schema, session.state()));
        self.state.session = Some(session);
    }

    fn handle_entry_editor_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.close_entry_editor(),
            KeyCode::Char('s') if ctrl => self.submit_entry(),
            KeyCode::Char('w') if key.modifiers.contains(crate::platform::ALT_SAVE_MODIFIER) => {
                self.submit_entry()
            }
            KeyCode::Tab => {
                if let Some(form) = &mut self.state.entry_form {
                    form.next_field();
                }
            }
            KeyCode::BackTab => {
                if let Some(form) = &mut self.state.entry_form {
                    form.prev_field();
                }
            }
            KeyCode::Char(' ') if self.active_is_checkbox() => self.edit_active(|f| f.toggle()),
            KeyCode::Enter if self.active_is_checkbox() => self.edit_active(|f| f.toggle()),
            KeyCode::Enter => {
                let multiline = self
                    .state
                    .entry_form
                    .as_ref()
                    .is_some_and(EntryForm::is_active_field_multiline);
                if multiline {
                    self.edit_active(|f| f.push_char('\n'));
                } else if let Some(form) = &mut self.state.entry_form {
                    form.next_field();
                }
            }
            KeyCode::Char(c) if !ctrl => self.edit_active(|f| f.push_char(c)),
            KeyCode::Backspace => self.edit_active(|f| f.pop_char()),
            _ => {}
        }
    }

    fn active_is_checkbox(&self) -> bool {
        self.state
            .entry_form
            .as_ref()
            .and_then(EntryForm::active)
            .is_some_and(|f| f.editor == crate::schema::EditorKind::Checkbox)
    }

    /// Change the focused field's buffer and push the result into the session
    fn edit_active(&mut self, change: impl FnOnce(&mut crate::state::FormField) -> bool) {
        let editable = self
            .state
            .session
            .as_ref()
            .is_some_and(|s| s.phase().is_editable());
        if !editable {
            return;
        }
        let Some(field) = self.state.entry_form.as_mut().and_then(EntryForm::active_mut) else {
            return;
        };
        if !change(field) {
            return;
        }
        let name = field.name.clone();
        let input = field.input();
        if let Some(session) = &mut self.state.session {
            session.edit(&name, input);
        }
    }

    /// Submit the live session's entry
    pub fn submit_entry(&mut self) {
        let enforce_required = self.config.enforce_required();
        let Some(session) = &mut self.state.session else {
            return;
        };
        let request = match session.begin_submit(enforce_required) {
            Ok(request) => request,
            Err(SubmitError::NotEditable) => {
                self.status_message = Some("Entry is not ready to save".to_string());
                return;
            }
            Err(e) => {
                self.push_error(e.to_string());
                return;
            }
        };

        let sync = self.sync.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let session_id = request.session_id;
            let result = sync.submit(request).await;
            let _ = tx.send(AppEvent::EntrySubmitted { session_id, result });
        });
    }

    fn finish_entry_submit(&mut self, session_id: Uuid, result: Result<EntryPayload, ApiError>) {
        if self.live_session_id() != Some(session_id) {
            tracing::debug!(session = %session_id, "dropping submit result of closed session");
            return;
        }
        let Some(session) = &mut self.state.session else {
            return;
        };
        match session.finish_submit(result) {
            Ok(saved) => {
                self.status_message = Some(match saved.id {
                    Some(id) => format!("Entry #{id} saved"),
                    None => "Entry saved".to_string(),
                });
                self.close_entry_editor();
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    /// Whether the live session is waiting on the backend
    pub fn is_busy(&self) -> bool {
        self.state.schema_saving()
            || self
                .state
                .session
                .as_ref()
                .is_some_and(|s| matches!(s.phase(), SessionPhase::Loading | SessionPhase::Submitting))
    }

    /// Focused schema builder cell, for rendering
    pub fn schema_cell(&self) -> SchemaCell {
        self.state.schema_form.active_cell()
    }
}
