//! Schema builder view

use crate::app::App;
use crate::platform::{ADD_FIELD_SHORTCUT, REMOVE_FIELD_SHORTCUT, SAVE_SHORTCUT};
use crate::schema::{FieldDefinition, FieldKind};
use crate::state::SchemaCell;
use crate::ui::render_scrollable_list;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Width of the name column
const NAME_WIDTH: usize = 24;

fn cell_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    }
}

fn field_row(index: usize, field: &FieldDefinition, cell: SchemaCell) -> ListItem<'static> {
    let name_active = cell == SchemaCell::Name(index);
    let kind_active = cell == SchemaCell::Kind(index);
    let required_active = cell == SchemaCell::Required(index);

    let name = if field.name.is_empty() && !name_active {
        "(unnamed)".to_string()
    } else if name_active {
        format!("{}▌", field.name)
    } else {
        field.name.clone()
    };
    let kind_color = if field.kind.is_known() {
        Color::Magenta
    } else {
        Color::Yellow
    };

    ListItem::new(Line::from(vec![
        Span::styled(format!("{:>2}. ", index + 1), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{name:<NAME_WIDTH$}"), cell_style(name_active)),
        Span::raw(" "),
        Span::styled(
            format!("◂ {:<8} ▸", field.kind.as_str()),
            cell_style(kind_active).fg(kind_color),
        ),
        Span::raw(" "),
        Span::styled(
            format!("{} required", if field.required { "[x]" } else { "[ ]" }),
            cell_style(required_active),
        ),
    ]))
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.schema_form;
    let cell = app.schema_cell();
    let duplicates = form.duplicate_names();

    let outer = Block::default()
        .title(" New Content Type ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                   // Type name
            Constraint::Min(3),                                      // Fields
            Constraint::Length(u16::from(!duplicates.is_empty())),   // Warning
            Constraint::Length(1),                                   // Help text
        ])
        .split(inner);

    let name_active = cell == SchemaCell::TypeName;
    let type_name = form.builder.type_name();
    let shown = match (type_name.is_empty(), name_active) {
        (true, false) => Span::styled("(empty)", Style::default().fg(Color::DarkGray)),
        (_, true) => Span::styled(format!("{type_name}▌"), Style::default().fg(Color::Cyan)),
        (false, false) => Span::raw(type_name.to_string()),
    };
    let accent = if name_active { Color::Cyan } else { Color::DarkGray };
    frame.render_widget(
        Paragraph::new(Line::from(shown)).block(
            Block::default()
                .title(" Type Name ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent)),
        ),
        chunks[0],
    );

    let fields = form.builder.fields();
    let fields_block = Block::default()
        .title(format!(" Fields ({}) ", fields.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    if fields.is_empty() {
        frame.render_widget(
            Paragraph::new(format!("No fields yet. Press {ADD_FIELD_SHORTCUT} to add one."))
                .style(Style::default().fg(Color::DarkGray))
                .block(fields_block),
            chunks[1],
        );
    } else {
        let items: Vec<ListItem> = fields
            .iter()
            .enumerate()
            .map(|(index, field)| field_row(index, field, cell))
            .collect();
        let selected = form.active_row().unwrap_or(0);
        render_scrollable_list(
            frame,
            chunks[1],
            List::new(items).block(fields_block),
            selected,
        );
    }

    if !duplicates.is_empty() {
        frame.render_widget(
            Paragraph::new(format!("Duplicate field names: {}", duplicates.join(", ")))
                .style(Style::default().fg(Color::Yellow)),
            chunks[2],
        );
    }

    let help = if app.state.schema_saving() {
        Line::from(Span::styled("Saving...", Style::default().fg(Color::Yellow)))
    } else if matches!(cell, SchemaCell::Kind(_)) {
        let kinds: Vec<&str> = FieldKind::ALL.iter().map(FieldKind::as_str).collect();
        Line::from(vec![
            Span::styled("←/→", Style::default().fg(Color::Cyan)),
            Span::raw(format!(": {}", kinds.join(" | "))),
        ])
    } else {
        Line::from(vec![
            Span::styled(ADD_FIELD_SHORTCUT, Style::default().fg(Color::Cyan)),
            Span::raw(": add  "),
            Span::styled(REMOVE_FIELD_SHORTCUT, Style::default().fg(Color::Cyan)),
            Span::raw(": remove  "),
            Span::styled(SAVE_SHORTCUT, Style::default().fg(Color::Cyan)),
            Span::raw(": save  "),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::raw(": back"),
        ])
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}
