//! Help overlay component
//!
//! Displays context-sensitive help using a floating window.

use super::floating_window::{FloatingWindow, FloatingWindowConfig};
use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::AppMode;
use crate::theme::{Colors, Styles};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Help overlay component
pub struct HelpOverlay {
    window: FloatingWindow,
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given mode
    pub fn new(mode: &AppMode, keybinding_ctx: &KeybindingContext) -> Self {
        let config = FloatingWindowConfig {
            title: "Help".to_string(),
            width_percent: 60,
            height_percent: 70,
            min_width: 44,
            min_height: 15,
            max_width: 72,
            max_height: 32,
            ..Default::default()
        };

        let sections = keybinding_ctx.get_help_content(mode);
        Self {
            window: FloatingWindow::new(config),
            content: Self::build_content(&sections, mode),
        }
    }

    fn mode_name(mode: &AppMode) -> &'static str {
        match mode {
            AppMode::ChoiceQuestion => "Question",
            AppMode::FieldQuestion => "Question (typed answer)",
            AppMode::Results => "Diagnosis",
            AppMode::EmailEntry => "Email results",
        }
    }

    fn build_content(sections: &[HelpSection], mode: &AppMode) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = vec![
            Line::from(Span::styled("  Plant Diagnosis Help  ", Styles::title())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Current: ", Style::default().fg(Colors::FG_MUTED)),
                Span::styled(Self::mode_name(mode), Style::default().fg(Colors::SECONDARY)),
            ]),
            Line::from(""),
        ];

        for section in sections {
            lines.push(Line::from(Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )));
            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{:<10}", key), Styles::nav_key()),
                    Span::styled(description.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines
    }

    /// Plain text of the overlay, one string per line
    pub fn text_lines(&self) -> Vec<String> {
        self.content
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    /// Render the help overlay
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        self.window
            .render_lines(f, parent, &self.content, Some("Press F1 or Esc to close"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_names_mode_and_keys() {
        let overlay = HelpOverlay::new(&AppMode::FieldQuestion, &KeybindingContext::new());
        let text = overlay.text_lines();
        assert!(text.iter().any(|l| l.contains("Question (typed answer)")));
        assert!(text.iter().any(|l| l.contains("F2") && l.contains("Not sure")));
    }
}
