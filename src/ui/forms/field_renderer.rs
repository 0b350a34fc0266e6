//! Field rendering utilities for forms

use crate::schema::EditorKind;
use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field needs, borders included
pub fn field_height(field: &FormField) -> u16 {
    if field.is_multiline() {
        6
    } else {
        3
    }
}

/// Draw one entry field with its label, kind badge and required marker
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let accent = if is_active { Color::Cyan } else { Color::DarkGray };
    let cursor = Span::styled(
        if is_active { "▌" } else { "" },
        Style::default().fg(Color::Cyan),
    );

    let content = match field.editor {
        EditorKind::Checkbox => {
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            Paragraph::new(Line::from(Span::styled(field.display_value(), style)))
        }
        EditorKind::MultiLine => {
            let mut lines: Vec<Line> = field
                .as_text()
                .split('\n')
                .map(|l| Line::from(l.to_string()))
                .collect();
            if field.as_text().is_empty() && !is_active {
                lines = vec![Line::from(Span::styled(
                    "(empty)",
                    Style::default().fg(Color::DarkGray),
                ))];
            } else if let Some(last) = lines.last_mut() {
                last.spans.push(cursor);
            }
            Paragraph::new(lines)
        }
        EditorKind::SingleLine | EditorKind::Numeric | EditorKind::Date => {
            let text = field.as_text();
            let shown = if text.is_empty() && !is_active {
                placeholder(field.editor).to_string()
            } else {
                text.to_string()
            };
            Paragraph::new(Line::from(vec![
                Span::styled(shown, Style::default().fg(accent)),
                cursor,
            ]))
        }
    };

    let mut title = vec![Span::raw(format!(" {} ", field.label))];
    if field.required {
        title.push(Span::styled("* ", Style::default().fg(Color::Red)));
    }
    title.push(Span::styled(
        format!("[{}] ", field.badge),
        Style::default().fg(Color::Magenta),
    ));

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

fn placeholder(editor: EditorKind) -> &'static str {
    match editor {
        EditorKind::Date => "YYYY-MM-DD",
        _ => "(empty)",
    }
}
