//! Centralized theme and styling for the TUI
//!
//! Single source of truth for colors and styles. The palette follows the
//! desktop version of the tool: near-black panels, grey buttons, white text.
//!
//! # Usage
//! ```rust
//! use plantdoc::theme::{Colors, Styles};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! ```

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    /// Panel background (#0d0d0d)
    pub const BG_PRIMARY: Color = Color::Rgb(13, 13, 13);

    /// Button and input field background (#444444)
    pub const BG_BUTTON: Color = Color::Rgb(68, 68, 68);

    /// Pressed/selected button background (#555555)
    pub const BG_BUTTON_ACTIVE: Color = Color::Rgb(85, 85, 85);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Accent for borders, titles and the progress gauge
    pub const PRIMARY: Color = Color::Rgb(120, 200, 80);

    /// Diagnosis titles
    pub const SECONDARY: Color = Color::Yellow;

    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    /// Unfocused border
    pub const BORDER_INACTIVE: Color = Color::DarkGray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Muted/secondary text
    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Main title style
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Diagnosis heading
    pub fn diagnosis_title() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Panel background
    pub fn panel_bg() -> Style {
        Style::default().bg(Colors::BG_PRIMARY).fg(Colors::FG_PRIMARY)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::PRIMARY)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Selected button
    pub fn button_active() -> Style {
        Style::default()
            .fg(Colors::FG_PRIMARY)
            .bg(Colors::BG_BUTTON_ACTIVE)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    /// Unselected button
    pub fn button_inactive() -> Style {
        Style::default().fg(Colors::FG_PRIMARY).bg(Colors::BG_BUTTON)
    }

    /// Text field with focus
    pub fn field_focused() -> Style {
        Style::default()
            .fg(Colors::FG_PRIMARY)
            .bg(Colors::BG_BUTTON_ACTIVE)
    }

    /// Text field without focus
    pub fn field() -> Style {
        Style::default().fg(Colors::FG_SECONDARY).bg(Colors::BG_BUTTON)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    /// Progress bar style
    pub fn progress() -> Style {
        Style::default().fg(Colors::PRIMARY).bg(Colors::BG_BUTTON)
    }

    /// Navigation hint (keybindings)
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Key name in the navigation bar
    pub fn nav_key() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }
}

/// Severity of a notice overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Border/title color for this severity
    pub fn style(self) -> Style {
        match self {
            Self::Info => Styles::success(),
            Self::Warning => Styles::warning(),
            Self::Error => Styles::error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_styles_differ() {
        assert_ne!(Severity::Info.style(), Severity::Error.style());
        assert_eq!(Severity::Warning.style(), Styles::warning());
    }

    #[test]
    fn test_button_styles_differ() {
        assert_ne!(Styles::button_active(), Styles::button_inactive());
    }
}
