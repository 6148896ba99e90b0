//! Theme configuration for the TUI.
//!
//! Supports light and dark palettes. The shell holds a single dark/light flag;
//! the palette is derived from it, so flipping the flag twice yields the
//! identical theme.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::config::ThemeMode;
use crate::data::{LineStatus, Severity};

/// Accent used to tell line cards apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Primary,
    Warning,
    Success,
}

impl Accent {
    /// Accent for the card at `index`, cycling primary → warning → success.
    pub fn for_index(index: usize) -> Self {
        match index % 3 {
            0 => Accent::Primary,
            1 => Accent::Warning,
            _ => Accent::Success,
        }
    }

    /// Glyph shown in the card title.
    pub fn glyph(&self) -> &'static str {
        match self {
            Accent::Primary => "▣",
            Accent::Warning => "↗",
            Accent::Success => "▥",
        }
    }
}

/// Color and style theme for the TUI.
///
/// Use [`Theme::from_mode()`] to resolve a configured [`ThemeMode`], or
/// [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    /// Frame background.
    pub background: Color,
    /// Default text colour.
    pub foreground: Color,
    /// Secondary text (labels, timestamps).
    pub muted: Color,
    pub primary: Color,
    pub warning: Color,
    pub success: Color,
    pub critical: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for panel titles.
    pub header: Style,
    /// Border style of the selected line card.
    pub selected: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            dark: true,
            background: Color::Rgb(17, 19, 34),
            foreground: Color::White,
            muted: Color::Gray,
            primary: Color::Magenta,
            warning: Color::Yellow,
            success: Color::Green,
            critical: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            dark: false,
            background: Color::Rgb(245, 246, 250),
            foreground: Color::Black,
            muted: Color::DarkGray,
            primary: Color::Blue,
            warning: Color::Rgb(180, 120, 0),
            success: Color::Rgb(0, 130, 60),
            critical: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Theme for a dark/light flag.
    pub fn for_dark_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Resolve a configured mode, probing the terminal for `Auto`.
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
            ThemeMode::Auto => Self::auto_detect(),
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Base style applied to the whole frame.
    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.foreground)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn accent(&self, accent: Accent) -> Color {
        match accent {
            Accent::Primary => self.primary,
            Accent::Warning => self.warning,
            Accent::Success => self.success,
        }
    }

    /// Get style for a line status
    pub fn status_style(&self, status: LineStatus) -> Style {
        match status {
            LineStatus::Running => Style::default().fg(self.success),
            LineStatus::Attention => Style::default().fg(self.warning),
            LineStatus::Critical => Style::default().fg(self.critical).add_modifier(Modifier::BOLD),
        }
    }

    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Info => Style::default().fg(self.primary),
            Severity::Success => Style::default().fg(self.success),
            Severity::Warning => Style::default().fg(self.warning),
            Severity::Critical => Style::default().fg(self.critical).add_modifier(Modifier::BOLD),
        }
    }
}
