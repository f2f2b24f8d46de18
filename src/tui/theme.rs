// Theme system for the TUI
//
// A small set of built-in color themes, switchable at runtime with Ctrl+T.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use crate::logging::LogLevel;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Nord,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light, ThemeKind::Nord]
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    /// Resolve a config name; unknown names fall back to dark
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            "nord" => ThemeKind::Nord,
            _ => ThemeKind::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Nord => "Nord",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Nord => Theme::nord(),
        }
    }
}

/// Theme colors for every UI element
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub border_type: BorderType,

    pub title: Color,
    pub status_bar: Color,
    pub highlight: Color,

    pub selection: Color,
    pub selection_fg: Color,

    // Row accents
    pub stars: Color,
    pub owner: Color,
    pub anonymous: Color,
    pub error: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_focused: Color::Cyan,
            border_type: BorderType::Rounded,

            title: Color::Cyan,
            status_bar: Color::Green,
            highlight: Color::Cyan,

            selection: Color::DarkGray,
            selection_fg: Color::Yellow,

            stars: Color::Yellow,
            owner: Color::LightBlue,
            anonymous: Color::Magenta,
            error: Color::Red,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
        }
    }

    pub fn light() -> Self {
        let goldenrod = Color::Rgb(184, 134, 11);
        Self {
            background: Color::White,
            foreground: Color::Black,
            muted: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Blue,
            border_type: BorderType::Plain,

            title: Color::Blue,
            status_bar: Color::DarkGray,
            highlight: Color::Blue,

            selection: Color::LightBlue,
            selection_fg: Color::Black,

            stars: goldenrod,
            owner: Color::Blue,
            anonymous: Color::Magenta,
            error: Color::Red,

            log_error: Color::Red,
            log_warn: goldenrod,
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
        }
    }

    pub fn nord() -> Self {
        let frost = Color::Rgb(136, 192, 208);
        let snow = Color::Rgb(216, 222, 233);
        let polar = Color::Rgb(59, 66, 82);
        let comment = Color::Rgb(97, 110, 136);
        let yellow = Color::Rgb(235, 203, 139);
        let red = Color::Rgb(191, 97, 106);
        Self {
            background: Color::Rgb(46, 52, 64),
            foreground: snow,
            muted: comment,
            border: comment,
            border_focused: frost,
            border_type: BorderType::Rounded,

            title: frost,
            status_bar: Color::Rgb(163, 190, 140),
            highlight: frost,

            selection: polar,
            selection_fg: yellow,

            stars: yellow,
            owner: Color::Rgb(129, 161, 193),
            anonymous: Color::Rgb(180, 142, 173),
            error: red,

            log_error: red,
            log_warn: yellow,
            log_info: frost,
            log_debug: comment,
        }
    }

    /// Style for the highlighted row of a focused list
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    pub fn log_level_color(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Error => self.log_error,
            LogLevel::Warn => self.log_warn,
            LogLevel::Info => self.log_info,
            LogLevel::Debug | LogLevel::Trace => self.log_debug,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
