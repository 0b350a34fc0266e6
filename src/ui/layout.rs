//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::{ADD_FIELD_SHORTCUT, REMOVE_FIELD_SHORTCUT, SAVE_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    let busy = if app.is_busy() {
        Span::styled(" ◌ ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    };
    spans.push(busy);

    spans.push(Span::styled(
        get_view_hints(app.state.current_view),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        app.config.api_base_url(),
        Style::default().fg(Color::Blue),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right (double Ctrl+C to quit)
    let quit_hint = " ^C^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
pub fn get_view_hints(view: View) -> String {
    match view {
        View::ContentTypes => "j/k:nav  Enter:new entry  n:new type  r:reload".to_string(),
        View::SchemaBuilder => format!(
            "Tab:next  ←/→/Space:change  {ADD_FIELD_SHORTCUT}:add  {REMOVE_FIELD_SHORTCUT}:remove  {SAVE_SHORTCUT}:save  Esc:back"
        ),
        View::EntryEditor => format!("Tab:next  Space:toggle  {SAVE_SHORTCUT}:save  Esc:cancel"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_status_line() {
        let (content, status) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(content.height, 23);
        assert_eq!(status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_form_hints_mention_save() {
        assert!(get_view_hints(View::EntryEditor).contains(SAVE_SHORTCUT));
        assert!(get_view_hints(View::SchemaBuilder).contains(ADD_FIELD_SHORTCUT));
        assert!(!get_view_hints(View::ContentTypes).contains(SAVE_SHORTCUT));
    }
}
