//! User interface rendering module
//!
//! - `header` - Title banner, progress gauge, nav bar and help overlay
//! - `question` - The question screen (buttons or typed fields)
//! - `results` - Diagnosis list
//! - `dialogs` - Notices and the email prompt

mod dialogs;
mod header;
mod question;
pub mod results;

use crate::app::{AppMode, AppState};
use crate::components::keybindings::KeybindingContext;
use crate::theme::Styles;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
    Frame,
};

pub use header::HeaderRenderer;

/// UI renderer for the application
///
/// Entry point for drawing a frame; delegates to the submodules per mode.
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI for the current state
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        f.render_widget(Block::default().style(Styles::panel_bg()), f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.header.height()), // Banner
                Constraint::Min(1),                       // Main content area
                Constraint::Length(1),                    // Navigation bar
            ])
            .split(f.area());

        self.header.render_header(f, chunks[0]);

        match state.mode {
            AppMode::ChoiceQuestion | AppMode::FieldQuestion => {
                question::render_question_in_area(f, state, chunks[1]);
            }
            AppMode::Results => results::render_results_in_area(f, state, chunks[1]),
            AppMode::EmailEntry => {
                results::render_results_in_area(f, state, chunks[1]);
                dialogs::render_email_dialog(f, state);
            }
        }

        header::render_nav_bar(f, state, keybinding_ctx, chunks[2]);

        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
        // Notices sit above help so errors are never hidden
        if let Some(notice) = &state.notice {
            dialogs::render_notice(f, notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QuestionSheet;
    use crate::theme::Severity;
    use crate::app::Notice;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let renderer = UiRenderer::new();
        let ctx = KeybindingContext::new();
        terminal.draw(|f| renderer.render(f, state, &ctx)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_first_screen_shows_stage_buttons() {
        let text = screen(&AppState::with_sheet(QuestionSheet::standard()));
        assert!(text.contains("What stage of growth is your plant in?"));
        assert!(text.contains("Seedling"));
        assert!(text.contains("Flowering"));
        assert!(text.contains("Question 1 of 24"));
    }

    #[test]
    fn test_notice_is_drawn() {
        let mut state = AppState::with_sheet(QuestionSheet::standard());
        state.notice = Some(Notice::new("Input required", "Please enter a valid life stage", Severity::Warning));
        let text = screen(&state);
        assert!(text.contains("Input required"));
    }

    #[test]
    fn test_empty_sheet_renders_results() {
        let state = AppState::with_sheet(QuestionSheet::new(Vec::new()));
        assert_eq!(state.mode, AppMode::Results);
        let text = screen(&state);
        assert!(text.contains("Plant Stage: Unknown"));
    }
}
