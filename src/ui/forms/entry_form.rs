//! Entry editor view

use super::field_renderer::{draw_field, field_height};
use crate::app::App;
use crate::entry::{EntrySession, SessionPhase};
use crate::platform::SAVE_SHORTCUT;
use crate::state::{EntryForm, Form};
use crate::ui::widgets::visible_window;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn title(session: &EntrySession) -> String {
    let type_name = session
        .schema()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| format!("Content type {}", session.content_type_id()));
    match session.entry_id() {
        Some(id) => format!(" {type_name} - Edit #{id} "),
        None => format!(" {type_name} - New "),
    }
}

fn message(frame: &mut Frame, area: Rect, block: Block, text: String, color: Color) {
    let content = Paragraph::new(text)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(content, area);
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(session) = &app.state.session else {
        message(frame, area, block, "No entry open".into(), Color::DarkGray);
        return;
    };
    let block = block.title(title(session));

    match session.phase() {
        SessionPhase::Loading | SessionPhase::SchemaReady => {
            message(frame, area, block, "Loading...".into(), Color::DarkGray)
        }
        SessionPhase::Failed(err) if err.is_not_found() => {
            message(frame, area, block, "Content type not found".into(), Color::Red)
        }
        SessionPhase::Failed(err) => message(
            frame,
            area,
            block,
            format!("Error loading content type: {}", err.source),
            Color::Red,
        ),
        SessionPhase::Success(_) => message(frame, area, block, "Saved".into(), Color::Green),
        SessionPhase::EntryReady
        | SessionPhase::SchemaOnlyReady { .. }
        | SessionPhase::Submitting => match &app.state.entry_form {
            Some(form) => draw_editor(frame, area, block, session, form),
            None => message(frame, area, block, "Loading...".into(), Color::DarkGray),
        },
    }
}

/// Warning lines shown above the fields
fn notices(session: &EntrySession) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let SessionPhase::SchemaOnlyReady {
        entry_error: Some(err),
    } = session.phase()
    {
        lines.push(Line::from(Span::styled(
            format!("Could not load entry ({}); editing defaults", err.source),
            Style::default().fg(Color::Yellow),
        )));
    }
    let missing = session.missing_required();
    if !missing.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Required: {}", missing.join(", ")),
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(err) = session.last_error() {
        lines.push(Line::from(Span::styled(
            format!("Last save failed: {err}"),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

fn draw_editor(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    session: &EntrySession,
    form: &EntryForm,
) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let notices = notices(session);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(notices.len() as u16),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);
    frame.render_widget(Paragraph::new(notices), chunks[0]);

    if form.field_count() == 0 {
        frame.render_widget(
            Paragraph::new("This content type has no fields")
                .style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    } else {
        let heights: Vec<u16> = form.fields.iter().map(field_height).collect();
        let window = visible_window(&heights, chunks[1].height, form.active_field());
        let mut y = chunks[1].y;
        for index in window {
            let height = heights[index].min(chunks[1].bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            let row = Rect::new(chunks[1].x, y, chunks[1].width, height);
            draw_field(frame, row, &form.fields[index], index == form.active_field());
            y += height;
        }
    }

    let help = if matches!(session.phase(), SessionPhase::Submitting) {
        Line::from(Span::styled(
            "Saving...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(": next field  "),
            Span::styled(SAVE_SHORTCUT, Style::default().fg(Color::Cyan)),
            Span::raw(": save  "),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::raw(": cancel"),
        ])
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}
