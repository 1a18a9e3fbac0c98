//! Help overlay listing every key binding

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let key_style = Style::default().fg(theme.accent);
    let desc_style = Style::default().fg(theme.foreground);
    let header_style = Style::default()
        .fg(theme.border_focused)
        .add_modifier(Modifier::BOLD);

    // "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Navigation", header_style)),
        kb("Tab, ↓", "Next item"),
        kb("Shift+Tab, ↑", "Previous item"),
        kb("Enter", "Open link / copy / send"),
        Line::raw(""),
        Line::from(Span::styled("  Card", header_style)),
        kb("y", "Copy email"),
        kb("p", "Open profile photo"),
        Line::raw(""),
        Line::from(Span::styled("  Contact form", header_style)),
        kb("Ctrl+S", "Send message"),
        kb("Enter", "Next field / new line"),
        kb("Esc", "Leave field"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("t", "Cycle theme"),
        kb("L", "Toggle logs"),
        kb("?", "Toggle this help"),
        kb("q, Ctrl+C", "Quit"),
    ]);

    let area = centered_rect(44, 24, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(theme.surface))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .border_type(theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_rect(44, 24, area), Rect::new(0, 0, 30, 10));
        assert_eq!(centered_rect(10, 4, area), Rect::new(10, 3, 10, 4));
    }
}
