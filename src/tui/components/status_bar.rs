// Status bar component
//
// Key hints on the left, theme and form status on the right.

use crate::card::form::FormStatus;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render the status bar
///
/// Adapts to terminal width: narrow terminals get the short hint set.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let bp = Breakpoint::from_width(area.width);

    let hints = if app.focus.field().is_some() {
        " Tab next • Ctrl-S send • Esc leave field • Ctrl-C quit"
    } else if bp.at_least(Breakpoint::Normal) {
        " Tab focus • Enter open • y copy email • t theme • L logs • ? help • q quit"
    } else {
        " Tab • Enter • ? help • q quit"
    };

    let status = match app.card.form_status() {
        FormStatus::Idle => String::new(),
        FormStatus::Submitting => format!("{} sending", app.spinner_char()),
        FormStatus::Success => "sent".to_string(),
        FormStatus::Error => "send failed".to_string(),
    };
    let right = if status.is_empty() {
        format!("{} ", theme.kind.name())
    } else {
        format!("{} │ {} ", status, theme.kind.name())
    };

    let pad = (area.width as usize).saturating_sub(hints.width() + right.width());
    let base = Style::default().fg(theme.muted).bg(theme.surface);
    let line = Line::from(vec![
        Span::styled(hints, base),
        Span::styled(" ".repeat(pad), base),
        Span::styled(right, base.add_modifier(Modifier::BOLD)),
    ]);

    f.render_widget(Paragraph::new(line).style(base), area);
}
