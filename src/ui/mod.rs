//! UI module for rendering the TUI

mod components;
mod content_types;
mod forms;
mod layout;
mod widgets;

pub use widgets::render_scrollable_list;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::ContentTypes => content_types::draw(frame, main_area, app),
        View::SchemaBuilder => forms::draw_schema_builder(frame, main_area, app),
        View::EntryEditor => forms::draw_entry_editor(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message);
    }
}
