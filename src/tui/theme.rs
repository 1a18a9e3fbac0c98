// Theme system for the TUI
//
// Provides color themes that can be switched at runtime.
// Each theme defines colors for all UI elements of the card.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    /// Dark with orange accents (the card's signature look)
    #[default]
    Ember,
    Midnight,
    Paper,
    /// Terminal's own ANSI palette
    Terminal,
}

impl ThemeKind {
    /// Get all available themes
    pub fn all() -> &'static [ThemeKind] {
        &[
            ThemeKind::Ember,
            ThemeKind::Midnight,
            ThemeKind::Paper,
            ThemeKind::Terminal,
        ]
    }

    /// Look a theme up by name (case-insensitive), falling back to Ember
    pub fn by_name(name: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Ember => "Ember",
            ThemeKind::Midnight => "Midnight",
            ThemeKind::Paper => "Paper",
            ThemeKind::Terminal => "Terminal",
        }
    }

    /// Get the theme configuration
    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Ember => Theme::ember(),
            ThemeKind::Midnight => Theme::midnight(),
            ThemeKind::Paper => Theme::paper(),
            ThemeKind::Terminal => Theme::terminal(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,

    // Base colors
    pub background: Color,
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub border_type: BorderType,

    // Brand
    pub accent: Color,
    pub accent_fg: Color,

    // Feedback
    pub success: Color,
    pub error: Color,

    // Link accents (shown on focus)
    pub linkedin: Color,
    pub github: Color,
    pub scholar: Color,
    pub cv: Color,
}

impl Theme {
    pub fn ember() -> Self {
        Self {
            kind: ThemeKind::Ember,
            background: Color::Rgb(10, 10, 10),
            surface: Color::Rgb(24, 22, 20),
            foreground: Color::Rgb(229, 231, 235),
            muted: Color::Rgb(107, 114, 128),
            border: Color::Rgb(58, 52, 48),
            border_focused: Color::Rgb(249, 115, 22),
            border_type: BorderType::Rounded,
            accent: Color::Rgb(251, 146, 60),
            accent_fg: Color::Rgb(10, 10, 10),
            success: Color::Rgb(74, 222, 128),
            error: Color::Rgb(248, 113, 113),
            linkedin: Color::Rgb(30, 58, 138),
            github: Color::Rgb(63, 63, 70),
            scholar: Color::Rgb(20, 83, 45),
            cv: Color::Rgb(88, 28, 135),
        }
    }

    pub fn midnight() -> Self {
        Self {
            kind: ThemeKind::Midnight,
            background: Color::Rgb(15, 17, 26),
            surface: Color::Rgb(26, 29, 43),
            foreground: Color::Rgb(200, 211, 245),
            muted: Color::Rgb(99, 109, 166),
            border: Color::Rgb(47, 51, 77),
            border_focused: Color::Rgb(130, 170, 255),
            border_type: BorderType::Rounded,
            accent: Color::Rgb(130, 170, 255),
            accent_fg: Color::Rgb(15, 17, 26),
            success: Color::Rgb(195, 232, 141),
            error: Color::Rgb(255, 117, 127),
            linkedin: Color::Rgb(37, 61, 120),
            github: Color::Rgb(55, 59, 80),
            scholar: Color::Rgb(32, 78, 60),
            cv: Color::Rgb(82, 48, 120),
        }
    }

    pub fn paper() -> Self {
        Self {
            kind: ThemeKind::Paper,
            background: Color::Rgb(250, 248, 245),
            surface: Color::Rgb(255, 255, 255),
            foreground: Color::Rgb(31, 41, 55),
            muted: Color::Rgb(120, 113, 108),
            border: Color::Rgb(214, 211, 209),
            border_focused: Color::Rgb(234, 88, 12),
            border_type: BorderType::Rounded,
            accent: Color::Rgb(234, 88, 12),
            accent_fg: Color::Rgb(255, 255, 255),
            success: Color::Rgb(22, 163, 74),
            error: Color::Rgb(220, 38, 38),
            linkedin: Color::Rgb(191, 219, 254),
            github: Color::Rgb(228, 228, 231),
            scholar: Color::Rgb(187, 247, 208),
            cv: Color::Rgb(233, 213, 255),
        }
    }

    pub fn terminal() -> Self {
        Self {
            kind: ThemeKind::Terminal,
            background: Color::Reset,
            surface: Color::Reset,
            foreground: Color::Reset,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Yellow,
            border_type: BorderType::Plain,
            accent: Color::Yellow,
            accent_fg: Color::Black,
            success: Color::Green,
            error: Color::Red,
            linkedin: Color::Blue,
            github: Color::DarkGray,
            scholar: Color::Green,
            cv: Color::Magenta,
        }
    }
}
