// Contact form component
//
// Renders the form for Idle / Submitting / Error and the confirmation
// panel for Success. Field text and status come from the card; the TUI
// only adds the cursor.

use crate::card::form::{Field, FormStatus};
use crate::tui::app::App;
use crate::tui::focus::Focus;
use crate::tui::text_input;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

const MESSAGE_ROWS: u16 = 3;
const SEND_LABEL: &str = "Send Message ➤";
const ERROR_TEXT: &str = "Something went wrong. Please try again.";

fn field_height(field: Field) -> u16 {
    if field.is_multiline() {
        MESSAGE_ROWS + 2
    } else {
        3
    }
}

fn error_rows(app: &App, field: Field) -> u16 {
    u16::from(app.card.field_error(field).is_some())
}

/// Rows the form needs, borders included
pub fn height(app: &App) -> u16 {
    let fields: u16 = Field::ALL
        .iter()
        .map(|&f| field_height(f) + error_rows(app, f))
        .sum();
    // header, subtitle gap, fields, send button, status line, borders
    2 + fields + 3 + 1 + 2
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.surface))
        .title(Line::from(Span::styled(
            " Contact Me ",
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        )))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [subtitle, body] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
    f.render_widget(
        Paragraph::new("GET IN TOUCH FOR COLLABORATIONS")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted)),
        subtitle,
    );

    if app.form_visible() {
        render_fields(f, body, app);
    } else {
        render_success(f, body, app);
    }
}

fn render_fields(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let mut constraints = Vec::new();
    for field in Field::ALL {
        constraints.push(Constraint::Length(field_height(field)));
        constraints.push(Constraint::Length(error_rows(app, field)));
    }
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));
    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in Field::ALL.into_iter().enumerate() {
        render_input(f, rows[i * 2], app, field);
        if let Some(error) = app.card.field_error(field) {
            f.render_widget(
                Paragraph::new(format!(" {}", error.message()))
                    .style(Style::default().fg(theme.error)),
                rows[i * 2 + 1],
            );
        }
    }

    let send_row = Field::ALL.len() * 2;
    render_send(f, rows[send_row], app);

    if app.card.form_status() == FormStatus::Error {
        f.render_widget(
            Paragraph::new(ERROR_TEXT)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.error)),
            rows[send_row + 1],
        );
    }
}

fn render_input(f: &mut Frame, area: Rect, app: &App, field: Field) {
    let theme = &app.theme;
    let focused = app.is_focused(Focus::Field(field));
    let text = app.card.field(field);

    let border = if app.card.field_error(field).is_some() {
        theme.error
    } else if focused {
        theme.border_focused
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);

    if text.is_empty() {
        f.render_widget(
            Paragraph::new(field.placeholder())
                .style(Style::default().fg(theme.muted))
                .block(block),
            area,
        );
        if focused && !app.show_help {
            f.set_cursor_position(Position::new(inner.x, inner.y));
        }
        return;
    }

    let (line, col) = text_input::cursor_position(text, app.cursor(field));
    let top = line.saturating_sub(inner.height.saturating_sub(1) as usize);
    let width = inner.width as usize;

    let lines: Vec<Line> = text
        .split('\n')
        .enumerate()
        .skip(top)
        .take(inner.height as usize)
        .map(|(i, raw)| {
            let skip = if i == line { scroll_offset(raw, col, width) } else { 0 };
            Line::from(skip_cells(raw, skip))
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(theme.foreground))
            .block(block),
        area,
    );

    if focused && !app.show_help {
        let cursor_line = text.split('\n').nth(line).unwrap_or_default();
        let visible_col = col.saturating_sub(scroll_offset(cursor_line, col, width));
        f.set_cursor_position(Position::new(
            inner.x + visible_col as u16,
            inner.y + (line - top) as u16,
        ));
    }
}

/// Cells to scroll a line left so column `col` stays inside `width`
fn scroll_offset(line: &str, col: usize, width: usize) -> usize {
    if width == 0 || col < width {
        return 0;
    }
    // Scroll in whole chars so wide glyphs aren't split
    let mut skipped = 0;
    for c in line.chars() {
        if col.saturating_sub(skipped) < width {
            break;
        }
        skipped += c.width().unwrap_or(0);
    }
    skipped
}

fn skip_cells(line: &str, cells: usize) -> String {
    let mut skipped = 0;
    line.chars()
        .skip_while(|c| {
            if skipped >= cells {
                return false;
            }
            skipped += c.width().unwrap_or(0);
            true
        })
        .collect()
}

fn render_send(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.is_focused(Focus::Send);
    let disabled = app.card.submit_disabled();

    let (label, style, border) = if disabled {
        // Busy indicator replaces the label while the post is in flight
        (
            app.spinner_char().to_string(),
            Style::default().fg(theme.muted),
            theme.muted,
        )
    } else if focused {
        (
            SEND_LABEL.to_string(),
            Style::default()
                .fg(theme.accent_fg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
            theme.accent,
        )
    } else {
        (
            SEND_LABEL.to_string(),
            Style::default().fg(theme.accent),
            theme.border,
        )
    };

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border)),
        );
    f.render_widget(button, area);
}

fn render_success(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "✓",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Thank you!",
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Your message has been sent successfully.",
            Style::default().fg(theme.muted),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::app_with;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &App) -> String {
        let (width, height) = (64, height(app));
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render(f, Rect::new(0, 0, width, height), app))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_spinner_replaces_label_while_submitting() {
        let (mut app, _rx) = app_with("http://127.0.0.1:9/f");
        assert!(rendered(&app).contains("Send Message"));

        *app.card.field_mut(Field::Name) = "Ada".to_string();
        *app.card.field_mut(Field::Email) = "ada@example.com".to_string();
        *app.card.field_mut(Field::Message) = "Hello".to_string();
        app.submit();
        assert_eq!(app.card.form_status(), FormStatus::Submitting);

        let text = rendered(&app);
        assert!(!text.contains("Send Message"));
        assert!(text.contains(app.spinner_char()));
    }

    #[test]
    fn test_no_scroll_when_cursor_fits() {
        assert_eq!(scroll_offset("hello", 5, 10), 0);
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let line = "abcdefghijkl";
        let offset = scroll_offset(line, 12, 10);
        assert!(12 - offset < 10);
        assert_eq!(skip_cells(line, offset), &line[offset..]);
    }

    #[test]
    fn test_skip_cells_respects_wide_chars() {
        assert_eq!(skip_cells("日本語", 2), "本語");
        assert_eq!(skip_cells("abc", 0), "abc");
    }
}
