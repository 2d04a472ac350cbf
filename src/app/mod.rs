//! Application module
//!
//! Contains the terminal front end: state, key handling and the event loop.
//!
//! # Module Structure
//! - `state` - Presentation state types (AppState, AppMode, Notice)
//! - Main module - App struct and event loop

mod state;

// Re-export state types for external use
pub use state::{AppMode, AppState, Notice};

use crate::answer::RawInput;
use crate::assets::AssetResolver;
use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::error::{PlantDocError, Result};
use crate::questions::QuestionSheet;
use crate::report::{DispatchError, Report, ReportDispatcher};
use crate::session::Submission;
use crate::settings::Settings;
use crate::theme::Severity;
use crate::types::{Choice, InputMode, LifeStage};
use crate::ui::UiRenderer;
use crate::ui::results::result_lines;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Main application struct
pub struct App {
    state: AppState,
    assets: Box<dyn AssetResolver>,
    dispatcher: Box<dyn ReportDispatcher>,
    sender: String,
    subject: String,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints
    keybinding_context: KeybindingContext,
}

impl App {
    /// Create a new application instance from settings
    pub fn new(settings: &Settings) -> Self {
        Self::with_collaborators(
            settings.question_sheet(),
            Box::new(settings.asset_resolver()),
            settings.report_dispatcher(),
            settings,
        )
    }

    /// Create an application with explicit collaborators
    pub fn with_collaborators(
        sheet: QuestionSheet,
        assets: Box<dyn AssetResolver>,
        dispatcher: Box<dyn ReportDispatcher>,
        settings: &Settings,
    ) -> Self {
        info!(
            questions = sheet.len(),
            dispatcher = %dispatcher.describe(),
            "Creating new App instance"
        );
        let mut app = Self {
            state: AppState::with_sheet(sheet),
            assets,
            dispatcher,
            sender: settings.sender.clone(),
            subject: settings.subject.clone(),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
        };
        if app.state.session.is_resolved() {
            app.on_resolved();
        } else {
            app.refresh_image();
        }
        app
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Toggle help overlay visibility
    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            terminal
                .draw(|f| {
                    self.ui_renderer
                        .render(f, &self.state, &self.keybinding_context)
                })
                .map_err(|e| PlantDocError::terminal(format!("Failed to draw: {}", e)))?;

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if self.handle_key_event(key_event) {
                        break; // Exit requested
                    }
                }
            }
        }

        info!(resolved = self.state.session.is_resolved(), "Leaving main loop");
        Ok(())
    }

    /// Handle one key press. Returns `true` when the user asked to quit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        let bound = self.keybinding_context.action_for(&self.state.mode, &key);
        if bound == Some(KeyAction::Quit) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Modal overlays swallow input until dismissed
        if self.state.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.notice = None;
            }
            return false;
        }
        if self.state.help_visible {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.state.help_visible = false;
            }
            return false;
        }
        if bound == Some(KeyAction::Help) && key.code == KeyCode::F(1) {
            self.toggle_help();
            return false;
        }

        match self.state.mode {
            AppMode::ChoiceQuestion => self.handle_choice_key(key),
            AppMode::FieldQuestion => self.handle_field_key(key),
            AppMode::Results => self.handle_results_key(key),
            AppMode::EmailEntry => self.handle_email_key(key),
        }
    }

    fn handle_choice_key(&mut self, key: KeyEvent) -> bool {
        let buttons = self.state.buttons().len();
        let stage_step = self.state.prompt().map(|p| p.mode) == Some(InputMode::LifeStage);

        match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::BackTab => {
                self.state.selection = self.state.selection.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
                if self.state.selection + 1 < buttons {
                    self.state.selection += 1;
                }
            }
            KeyCode::Enter => {
                let typed = self.state.fields.first().map(|f| f.trim().to_string());
                match typed {
                    Some(text) if stage_step && !text.is_empty() => self.submit(RawInput::Text(text)),
                    _ => self.submit_selected(),
                }
            }
            KeyCode::Esc => return true,
            KeyCode::Backspace if stage_step => {
                if let Some(field) = self.state.fields.first_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(c) if stage_step => match c {
                '1'..='3' => {
                    let stage = LifeStage::ALL[(c as u8 - b'1') as usize];
                    self.submit(RawInput::Stage(stage));
                }
                _ => {
                    if let Some(field) = self.state.fields.first_mut() {
                        field.push(c);
                    }
                }
            },
            KeyCode::Char('y') => self.submit(RawInput::Choice(Choice::Yes)),
            KeyCode::Char('n') => self.submit(RawInput::Choice(Choice::No)),
            KeyCode::Char('s') => self.submit(RawInput::Choice(Choice::NotSure)),
            KeyCode::Char('a') => self.submit(RawInput::Choice(Choice::NotApplicable)),
            KeyCode::Char('?') => self.toggle_help(),
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    fn handle_field_key(&mut self, key: KeyEvent) -> bool {
        let count = self.state.fields.len().max(1);

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.state.focused_field = (self.state.focused_field + 1) % count;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.focused_field = (self.state.focused_field + count - 1) % count;
            }
            KeyCode::Enter => self.submit_fields(),
            KeyCode::F(2) => self.submit(RawInput::Choice(Choice::NotSure)),
            KeyCode::Esc => return true,
            KeyCode::Backspace => {
                if let Some(field) = self.state.fields.get_mut(self.state.focused_field) {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.state.fields.get_mut(self.state.focused_field) {
                    field.push(c);
                }
            }
            _ => {}
        }
        false
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> bool {
        match self.keybinding_context.action_for(&AppMode::Results, &key) {
            Some(KeyAction::ScrollUp) => self.scroll_results_up(1),
            Some(KeyAction::ScrollDown) => self.scroll_results_down(1),
            Some(KeyAction::PageUp) => self.scroll_results_up(10),
            Some(KeyAction::PageDown) => self.scroll_results_down(10),
            Some(KeyAction::Email) => {
                self.state.email_input.clear();
                self.state.mode = AppMode::EmailEntry;
            }
            Some(KeyAction::Help) => self.toggle_help(),
            Some(KeyAction::Quit) => return true,
            _ => match key.code {
                KeyCode::Home => self.state.results_scroll = 0,
                KeyCode::Esc => return true,
                _ => {}
            },
        }
        false
    }

    fn scroll_results_up(&mut self, step: u16) {
        self.state.results_scroll = self.state.results_scroll.saturating_sub(step);
    }

    /// Scrolling stops with the last result line at the top
    fn scroll_results_down(&mut self, step: u16) {
        let last = u16::try_from(result_lines(&self.state).len().saturating_sub(1))
            .unwrap_or(u16::MAX);
        self.state.results_scroll = self.state.results_scroll.saturating_add(step).min(last);
    }

    fn handle_email_key(&mut self, key: KeyEvent) -> bool {
        match self.keybinding_context.action_for(&AppMode::EmailEntry, &key) {
            Some(KeyAction::Cancel) => self.state.mode = AppMode::Results,
            Some(KeyAction::Send) => self.send_report(),
            _ => match key.code {
                KeyCode::Backspace => {
                    self.state.email_input.pop();
                }
                KeyCode::Char(c) => self.state.email_input.push(c),
                _ => {}
            },
        }
        false
    }

    fn submit_selected(&mut self) {
        let Some(prompt) = self.state.prompt() else {
            return;
        };
        let input = match prompt.mode {
            InputMode::LifeStage => LifeStage::ALL
                .get(self.state.selection)
                .copied()
                .map(RawInput::Stage),
            mode => mode
                .choices()
                .get(self.state.selection)
                .copied()
                .map(RawInput::Choice),
        };
        if let Some(input) = input {
            self.submit(input);
        }
    }

    fn submit_fields(&mut self) {
        let Some(prompt) = self.state.prompt() else {
            return;
        };
        let field = |i: usize| self.state.fields.get(i).cloned().unwrap_or_default();
        let input = match prompt.mode {
            InputMode::Npk => RawInput::npk(field(0), field(1), field(2)),
            InputMode::Ph => RawInput::ph(field(0), field(1)),
            _ => RawInput::Text(field(0)),
        };
        self.submit(input);
    }

    fn submit(&mut self, input: RawInput) {
        match self.state.session.submit_answer(input) {
            Ok(Submission::Resolved) => self.on_resolved(),
            Ok(step) => {
                debug!(?step, "Advanced");
                self.state.reset_inputs();
                self.refresh_image();
                let (current, total) = self.state.session.progress();
                self.state.status_message = format!("Question {} of {}", current, total);
            }
            Err(e) => {
                self.state.notice = Some(Notice::new(e.title(), e.to_string(), Severity::Warning));
            }
        }
    }

    fn refresh_image(&mut self) {
        self.state.image_line = self
            .state
            .prompt()
            .and_then(|p| p.asset)
            .map(|asset| self.assets.describe(&asset));
    }

    fn on_resolved(&mut self) {
        self.state.reset_inputs();
        self.state.image_line = None;
        self.state.result_images = self
            .state
            .session
            .diagnoses()
            .iter()
            .map(|d| self.assets.describe(&d.asset))
            .collect();
        let found = self.state.session.diagnoses().len();
        self.state.status_message = match found {
            0 => "No problems identified".to_string(),
            1 => "1 possible issue identified".to_string(),
            n => format!("{} possible issues identified", n),
        };
        info!(diagnoses = found, "Showing results");
    }

    fn send_report(&mut self) {
        let result = Report::for_session(
            &self.state.session,
            &self.state.email_input,
            &self.sender,
            &self.subject,
        )
        .and_then(|report| self.dispatcher.dispatch(&report));

        self.state.notice = Some(match result {
            Ok(()) => {
                self.state.mode = AppMode::Results;
                Notice::new(
                    "Email Sent",
                    "Diagnosis results sent successfully.",
                    Severity::Info,
                )
            }
            Err(e @ (DispatchError::MissingAddress | DispatchError::InvalidAddress(_))) => {
                Notice::new("Email Error", e.to_string(), Severity::Warning)
            }
            Err(e) => {
                warn!(error = %e, "Report dispatch failed");
                Notice::new(
                    "Email Error",
                    format!("An error occurred while sending the email: {}", e),
                    Severity::Error,
                )
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NoAssets;
    use crate::report::OutboxDispatcher;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(dir: &TempDir) -> App {
        App::with_collaborators(
            QuestionSheet::standard(),
            Box::new(NoAssets),
            Box::new(OutboxDispatcher::new(dir.path())),
            &Settings::default(),
        )
    }

    #[test]
    fn test_starts_on_stage_question() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        assert_eq!(app.state().mode, AppMode::ChoiceQuestion);
        assert_eq!(app.state().buttons(), vec!["Seedling", "Vegetative", "Flowering"]);
        assert!(app.state().image_line.is_none());
    }

    #[test]
    fn test_typed_stage_is_submitted() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        for c in "Flowering".chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.state().session.life_stage(), "flowering");
        assert_eq!(app.state().image_line.as_deref(), Some("Image not found."));
    }

    #[test]
    fn test_invalid_typed_stage_shows_notice() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_key_event(key(KeyCode::Char('x')));
        app.handle_key_event(key(KeyCode::Enter));
        let notice = app.state().notice.clone().unwrap();
        assert_eq!(notice.title, "Input required");

        // Any input is swallowed until the notice is dismissed
        app.handle_key_event(key(KeyCode::Char('2')));
        assert_eq!(app.state().session.life_stage(), "");
        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.state().notice.is_none());
    }

    #[test]
    fn test_button_navigation() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_key_event(key(KeyCode::Right));
        app.handle_key_event(key(KeyCode::Right));
        app.handle_key_event(key(KeyCode::Right));
        assert_eq!(app.state().selection, 2);
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.state().session.life_stage(), "flowering");
        assert_eq!(app.state().selection, 0);
    }

    #[test]
    fn test_not_applicable_hotkey_rejected_on_yes_no() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_key_event(key(KeyCode::Char('1')));
        app.handle_key_event(key(KeyCode::Char('a')));
        assert!(app.state().notice.is_some());
        assert_eq!(app.state().session.answers().len(), 1);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_key_event(key(KeyCode::Char('x')));
        assert!(app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_help_toggle() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_key_event(key(KeyCode::F(1)));
        assert!(app.state().help_visible);
        app.handle_key_event(key(KeyCode::Esc));
        assert!(!app.state().help_visible);
    }
}
