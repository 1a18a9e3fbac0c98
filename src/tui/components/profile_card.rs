// Profile card component
//
// Monogram avatar, name, title and bio, then the link buttons and the
// copy-email button. Focus is drawn as a filled row in the link's accent.

use crate::card::links::{LinkButton, LinkKind};
use crate::tui::app::App;
use crate::tui::focus::Focus;
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const AVATAR_HEIGHT: u16 = 3;
const AVATAR_WIDTH: u16 = 8;

/// Rows the card needs, borders included
pub fn height(app: &App) -> u16 {
    // avatar, name, title, bio, gap, links, gap, email, borders
    AVATAR_HEIGHT + 4 + app.card.links().len() as u16 + 2 + 2
}

/// `breakpoint` is the terminal's, not the card's: the wide layout narrows
/// the card but still has room for hints.
pub fn render(f: &mut Frame, area: Rect, app: &App, breakpoint: Breakpoint) {
    let theme = &app.theme;
    let profile = &app.card.config().profile;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(AVATAR_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(app.card.links().len() as u16),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(inner);

    render_avatar(f, chunks[0], &profile.initials(), theme);

    let centered = |text: &str, style: Style| {
        Paragraph::new(Line::from(Span::styled(text.to_string(), style)))
            .alignment(Alignment::Center)
    };
    f.render_widget(
        centered(
            &profile.name,
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        chunks[1],
    );
    f.render_widget(
        centered(
            &profile.title.to_uppercase(),
            Style::default().fg(theme.accent),
        ),
        chunks[2],
    );
    f.render_widget(
        centered(
            &profile.bio,
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
        ),
        chunks[3],
    );

    let show_hints = breakpoint.at_least(Breakpoint::Normal);
    let link_rows =
        Layout::vertical(vec![Constraint::Length(1); app.card.links().len()]).split(chunks[5]);
    for (index, (button, row)) in app.card.links().iter().zip(link_rows.iter()).enumerate() {
        let focused = app.is_focused(Focus::Link(index));
        render_link(f, *row, button, focused, show_hints, theme);
    }

    render_email_button(f, chunks[7], app);
}

fn render_avatar(f: &mut Frame, area: Rect, initials: &str, theme: &Theme) {
    let x = area.x + area.width.saturating_sub(AVATAR_WIDTH) / 2;
    let avatar_area = Rect::new(x, area.y, AVATAR_WIDTH.min(area.width), area.height);

    let avatar = Paragraph::new(initials.to_string())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.accent)),
        );
    f.render_widget(avatar, avatar_area);
}

fn link_accent(kind: LinkKind, theme: &Theme) -> Color {
    match kind {
        LinkKind::LinkedIn => theme.linkedin,
        LinkKind::GitHub => theme.github,
        LinkKind::Scholar => theme.scholar,
        LinkKind::Cv => theme.cv,
    }
}

fn link_icon(kind: LinkKind) -> &'static str {
    match kind {
        LinkKind::LinkedIn => "in",
        LinkKind::GitHub => "gh",
        LinkKind::Scholar => "gs",
        LinkKind::Cv => "↓ ",
    }
}

fn render_link(
    f: &mut Frame,
    area: Rect,
    button: &LinkButton,
    focused: bool,
    show_hint: bool,
    theme: &Theme,
) {
    let base = if focused {
        Style::default()
            .fg(theme.foreground)
            .bg(link_accent(button.kind, theme))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.foreground)
    };
    let marker = if focused { "›" } else { " " };

    let mut spans = vec![
        Span::styled(format!(" {} ", marker), base),
        Span::styled(format!("{}  ", link_icon(button.kind)), base),
        Span::styled(button.label, base),
    ];

    if show_hint {
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let hint = button.hint();
        let room = (area.width as usize).saturating_sub(used + 2);
        if room > 8 {
            let hint = truncate(hint, room);
            let pad = room.saturating_sub(hint.width());
            spans.push(Span::styled(" ".repeat(pad + 1), base));
            spans.push(Span::styled(hint, base.fg(theme.muted)));
            spans.push(Span::styled(" ", base));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}

fn render_email_button(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.is_focused(Focus::CopyEmail);
    let email = &app.card.config().contact.email;

    let base = if focused {
        Style::default()
            .fg(theme.accent_fg)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.foreground)
    };

    // Check glyph while the copy window is open, copy glyph otherwise
    let (glyph, glyph_style) = if app.card.is_copied() {
        ("✓ copied", base.fg(if focused { theme.accent_fg } else { theme.success }))
    } else {
        ("⧉ copy", base.fg(if focused { theme.accent_fg } else { theme.muted }))
    };

    let left = format!(" ✉  {}", email);
    let pad = (area.width as usize).saturating_sub(left.width() + glyph.width() + 1);
    let line = Line::from(vec![
        Span::styled(left, base),
        Span::styled(" ".repeat(pad), base),
        Span::styled(glyph, glyph_style),
        Span::styled(" ", base),
    ]);
    f.render_widget(Paragraph::new(line).style(base), area);
}

/// Cut `text` to at most `max` cells, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}
