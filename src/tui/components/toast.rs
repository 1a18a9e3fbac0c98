//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a short duration.
//! Renders in the bottom-right corner on top of all other content.
//! Used for link activations (opened, saved) and their failures.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const TOAST_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// A toast notification that auto-dismisses
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

impl Toast {
    pub fn info(message: impl Into<String>, now: Instant) -> Self {
        Self::new(message, ToastKind::Info, now)
    }

    pub fn error(message: impl Into<String>, now: Instant) -> Self {
        Self::new(message, ToastKind::Error, now)
    }

    fn new(message: impl Into<String>, kind: ToastKind, now: Instant) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: now + TOAST_DURATION,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Render the toast in the bottom-right corner
    ///
    /// Uses `Clear` widget to ensure toast is visible on top of other content.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // 4 = one cell of padding plus the border, each side
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height);

        let accent = match self.kind {
            ToastKind::Info => theme.accent,
            ToastKind::Error => theme.error,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.surface));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_duration() {
        let t0 = Instant::now();
        let toast = Toast::info("Saved", t0);
        assert!(!toast.is_expired(t0));
        assert!(!toast.is_expired(t0 + TOAST_DURATION - Duration::from_millis(1)));
        assert!(toast.is_expired(t0 + TOAST_DURATION));
    }
}
