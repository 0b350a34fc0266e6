//! Modal dialog overlay

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MAX_WIDTH: u16 = 60;
/// Two columns of padding on each side
const PADDING: u16 = 4;

/// Render the error dialog centered over everything else
pub fn render_error_dialog(frame: &mut Frame, message: &str) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", key),
        Span::raw(" or "),
        Span::styled("Esc", key),
        Span::raw(" to dismiss"),
    ]);

    let area = frame.area();
    let max_text = usize::from(MAX_WIDTH.min(area.width).saturating_sub(PADDING + 2)).max(1);
    let lines = wrap_text(message, max_text);

    let text_width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain([hint.width(), "Error".len()])
        .max()
        .unwrap_or(0) as u16;
    let width = (text_width + PADDING + 2).min(MAX_WIDTH).min(area.width);
    // title, blank, message, blank, hint, borders
    let height = (lines.len() as u16 + 6).min(area.height);
    let dialog_area = centered(area, width, height);

    let mut content = vec![
        Line::from(Span::styled(
            "Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(lines.into_iter().map(Line::from));
    content.push(Line::from(""));
    content.push(hint);

    frame.render_widget(Clear, dialog_area);
    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().bg(Color::Black));
    frame.render_widget(dialog, dialog_area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Word-wrap `text` to `max_width` columns, keeping explicit line breaks
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = current.chars().count() + word.chars().count() + 1;
            if !current.is_empty() && needed > max_width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text("failed to save entry", 10),
            vec!["failed to", "save entry"]
        );
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_error_dialog_renders_message_and_hint() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| render_error_dialog(frame, "required fields are empty: title"))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Error"));
        assert!(text.contains("required fields are empty: title"));
        assert!(text.contains("to dismiss"));
    }

    #[test]
    fn test_error_dialog_fits_tiny_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(12, 4)).unwrap();
        terminal
            .draw(|frame| render_error_dialog(frame, "a rather long failure message"))
            .unwrap();
    }
}
