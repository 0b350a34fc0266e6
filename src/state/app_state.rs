//! Application state definitions

use super::forms::{EntryForm, SchemaForm};
use crate::entry::EntrySession;
use crate::schema::ContentTypeSchema;
use std::collections::VecDeque;
use uuid::Uuid;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    ContentTypes,
    SchemaBuilder,
    EntryEditor,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Data
    pub content_types: Vec<ContentTypeSchema>,
    pub content_types_loading: bool,

    // Selection
    pub selected_index: usize,

    // Schema builder
    pub schema_form: SchemaForm,
    /// Save in flight for the open builder; results of other saves are stale
    pub schema_save: Option<Uuid>,

    // Entry editor
    pub session: Option<EntrySession>,
    pub entry_form: Option<EntryForm>,

    // Errors waiting to be shown, oldest first
    error_queue: VecDeque<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn selected_content_type(&self) -> Option<&ContentTypeSchema> {
        self.content_types.get(self.selected_index)
    }

    /// Replace the content type list, keeping the selection in range
    pub fn set_content_types(&mut self, content_types: Vec<ContentTypeSchema>) {
        self.content_types = content_types;
        self.content_types_loading = false;
        if self.selected_index >= self.content_types.len() {
            self.selected_index = self.content_types.len().saturating_sub(1);
        }
    }

    pub fn schema_saving(&self) -> bool {
        self.schema_save.is_some()
    }

    /// Tear down the live edit session, if any
    pub fn close_session(&mut self) {
        self.session = None;
        self.entry_form = None;
    }

    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// The error currently on screen
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}
