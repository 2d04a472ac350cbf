//! Application state definitions
//!
//! Presentation state only: which screen is up, what is typed into the input
//! fields, which button is highlighted. Questionnaire data lives in `Session`.

use crate::questions::QuestionSheet;
use crate::session::{Prompt, Session};
use crate::theme::Severity;
use crate::types::{Choice, InputMode, LifeStage};

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Question answered with buttons
    ChoiceQuestion,
    /// Question answered by typing into fields
    FieldQuestion,
    /// Diagnosis list
    Results,
    /// Typing the address to email the results to
    EmailEntry,
}

/// A modal message; any key dismisses it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// The questionnaire run
    pub session: Session,
    /// Highlighted button on choice screens
    pub selection: usize,
    /// Typed input, one entry per field of the current question
    pub fields: Vec<String>,
    /// Field with keyboard focus
    pub focused_field: usize,
    /// Image line for the current prompt
    pub image_line: Option<String>,
    /// Image line per diagnosis, filled once on resolution
    pub result_images: Vec<String>,
    /// First visible line of the results list
    pub results_scroll: u16,
    /// Address typed on the email screen
    pub email_input: String,
    /// Modal notice, drawn above everything
    pub notice: Option<Notice>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Status message for user feedback
    pub status_message: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Session::start())
    }
}

impl AppState {
    pub fn new(session: Session) -> Self {
        let mut state = Self {
            mode: AppMode::ChoiceQuestion,
            session,
            selection: 0,
            fields: Vec::new(),
            focused_field: 0,
            image_line: None,
            result_images: Vec::new(),
            results_scroll: 0,
            email_input: String::new(),
            notice: None,
            help_visible: false,
            status_message: "Answer each question to diagnose your plant".to_string(),
        };
        state.reset_inputs();
        state
    }

    pub fn with_sheet(sheet: QuestionSheet) -> Self {
        Self::new(Session::with_sheet(sheet))
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.session.current_prompt()
    }

    /// Button labels for the current choice screen
    pub fn buttons(&self) -> Vec<&'static str> {
        match self.prompt().map(|p| p.mode) {
            Some(InputMode::LifeStage) => LifeStage::ALL.iter().map(|s| s.label()).collect(),
            Some(mode) => mode.choices().iter().map(Choice::label).collect(),
            None => Vec::new(),
        }
    }

    /// Field labels for the current field screen
    pub fn field_labels(&self) -> &'static [&'static str] {
        match self.prompt().map(|p| p.mode) {
            Some(InputMode::Npk) => &["N", "P", "K"],
            Some(InputMode::Ph) => &["Water pH", "Soil pH"],
            Some(InputMode::Text) => &["Answer"],
            Some(InputMode::LifeStage) => &["Or type a stage"],
            _ => &[],
        }
    }

    /// Clear typed input and pick the mode for the current step
    pub fn reset_inputs(&mut self) {
        self.selection = 0;
        self.focused_field = 0;
        self.fields = vec![String::new(); self.field_labels().len()];
        self.mode = match self.prompt().map(|p| p.mode) {
            None => AppMode::Results,
            Some(InputMode::Npk | InputMode::Ph | InputMode::Text) => AppMode::FieldQuestion,
            Some(_) => AppMode::ChoiceQuestion,
        };
    }
}
