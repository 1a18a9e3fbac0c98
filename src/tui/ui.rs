// Screen layout
//
// Stacked (card above form) on normal widths, side by side on wide ones.
// Overlays (toast, help) are drawn last so they sit on top.

use super::app::App;
use super::components::{contact_form, help, logs_panel, profile_card, status_bar};
use super::layout::Breakpoint;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::Style,
    widgets::{Block, Paragraph},
    Frame,
};

const COLUMN_WIDTH: u16 = 64;
const GAP: u16 = 2;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    let logs_height = if app.show_logs {
        logs_panel::PANEL_HEIGHT
    } else {
        0
    };
    let [main, logs, status] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(logs_height),
        Constraint::Length(1),
    ])
    .areas(area);

    let breakpoint = Breakpoint::from_width(area.width);
    if breakpoint.at_least(Breakpoint::Wide) {
        draw_side_by_side(f, main, app, breakpoint);
    } else {
        draw_stacked(f, main, app, breakpoint);
    }

    if app.show_logs {
        logs_panel::render(f, logs, app);
    }
    status_bar::render(f, status, app);

    if let Some(toast) = &app.toast {
        toast.render(f, main, &app.theme);
    }
    if app.show_help {
        help::render(f, app);
    }
}

fn draw_stacked(f: &mut Frame, area: Rect, app: &App, breakpoint: Breakpoint) {
    let [column] = Layout::horizontal([Constraint::Length(COLUMN_WIDTH)])
        .flex(Flex::Center)
        .areas(area);

    let [card, form, footer] = Layout::vertical([
        Constraint::Length(profile_card::height(app)),
        Constraint::Length(contact_form::height(app)),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(column);

    profile_card::render(f, card, app, breakpoint);
    contact_form::render(f, form, app);
    draw_footer(f, footer, app);
}

fn draw_side_by_side(f: &mut Frame, area: Rect, app: &App, breakpoint: Breakpoint) {
    let height = profile_card::height(app).max(contact_form::height(app));
    let [body, footer] = Layout::vertical([Constraint::Length(height), Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);

    let [card, form] = Layout::horizontal([
        Constraint::Length(COLUMN_WIDTH - 8),
        Constraint::Length(COLUMN_WIDTH),
    ])
    .flex(Flex::Center)
    .spacing(GAP)
    .areas(body);

    profile_card::render(f, card, app, breakpoint);
    contact_form::render(f, form, app);
    draw_footer(f, footer, app);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    f.render_widget(
        Paragraph::new(app.card.config().profile.footer.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::app_with;
    use ratatui::{backend::TestBackend, Terminal};

    /// Draw the whole screen and return it as text, one line per row
    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_link_hints_follow_terminal_width() {
        let (app, _rx) = app_with("http://127.0.0.1:9/f");

        // Stacked, then side by side with the narrower card column
        assert!(screen(&app, 80, 50).contains("github.com"));
        assert!(screen(&app, 140, 50).contains("github.com"));

        assert!(!screen(&app, 50, 50).contains("github.com"));
    }
}
