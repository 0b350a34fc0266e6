//! Content type list view

use super::render_scrollable_list;
use crate::app::App;
use crate::schema::ContentTypeSchema;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Number of field names previewed per content type
const PREVIEW_FIELDS: usize = 3;

/// "title, body, slug +2 more"
pub fn field_preview(schema: &ContentTypeSchema) -> String {
    let names: Vec<&str> = schema
        .fields
        .iter()
        .take(PREVIEW_FIELDS)
        .map(|f| f.name.as_str())
        .collect();
    let mut preview = names.join(", ");
    let rest = schema.fields.len().saturating_sub(PREVIEW_FIELDS);
    if rest > 0 {
        preview.push_str(&format!(" +{rest} more"));
    }
    preview
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Content Types ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let content_types = &app.state.content_types;
    if content_types.is_empty() {
        let message = if app.state.content_types_loading {
            "Loading..."
        } else {
            "No content types yet. Press n to create one."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = content_types
        .iter()
        .enumerate()
        .map(|(idx, schema)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            let count = schema.fields.len();
            let line = Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(&schema.name, style.fg(Color::Cyan)),
                Span::styled(
                    format!("  {count} field{}", if count == 1 { "" } else { "s" }),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw("  "),
                Span::styled(field_preview(schema), Style::default().fg(Color::DarkGray)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    render_scrollable_list(frame, area, list, app.state.selected_index);
}
