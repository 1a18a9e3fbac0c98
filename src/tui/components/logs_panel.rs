//! Logs panel component
//!
//! Shows the tail of the in-memory log buffer, color-coded by level.
//! Toggled with `L`; the buffer keeps filling while it is hidden.

use crate::logging::{LogEntry, LogLevel};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub const PANEL_HEIGHT: u16 = 8;

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

/// Get color style for log level
fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.accent),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let height = area.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = app
        .log_buffer
        .tail(height)
        .iter()
        .map(|entry| {
            ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, theme))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.surface))
            .title(" Logs "),
    );

    f.render_widget(list, area);
}
