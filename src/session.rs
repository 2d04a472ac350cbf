//! Question Sequencer
//!
//! Owns one questionnaire run: the question sheet, the answers collected so
//! far and the diagnoses produced at the end.
//!
//! # Design Principles
//!
//! - **Single owner**: a `Session` is a plain value; nothing is global or shared
//! - **Forward only**: an accepted answer advances exactly one question
//! - **Reject without mutation**: invalid input returns a `ValidationError` and
//!   leaves the session untouched so the host can re-prompt
//! - **Resolve once**: the resolver runs exactly once, when the last question
//!   is answered
//!
//! # Phase Flow
//!
//! ```text
//! Collecting(0) -> Collecting(1) -> ... -> Collecting(n-1) -> Resolved
//! ```
//!
//! The deficiency photo check has its own cursor. While it walks the
//! candidates the main index stays put; it moves on after the last photo.

use crate::answer::{Answer, AnswerSequence, RawInput};
use crate::logic::resolver::{self, DiagnosisRecord};
use crate::questions::{AssetRef, DeficiencyCandidate, QuestionSheet, QuestionSpec};
use crate::types::{Choice, InputMode, LifeStage};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    /// Waiting for the answer to the question at this index
    Collecting(usize),
    /// All questions answered, diagnoses available (terminal)
    Resolved,
}

impl SessionPhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collecting(i) => write!(f, "collecting answer {}", i + 1),
            Self::Resolved => f.write_str("results ready"),
        }
    }
}

/// Rejected input. The session is unchanged and the same question stands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid life stage: Seedling, Vegetative, or Flowering.")]
    LifeStage,

    #[error("Please enter all NPK values.")]
    MissingNpk,

    #[error("Please enter both water pH and soil pH values.")]
    MissingPh,

    #[error("Please enter a value.")]
    MissingText,

    #[error("Please choose one of: {options}.")]
    InvalidChoice { options: String },

    #[error("The questionnaire is already complete.")]
    AlreadyResolved,
}

impl ValidationError {
    /// Dialog title the hosts show above the message
    pub fn title(&self) -> &'static str {
        match self {
            Self::AlreadyResolved => "Questionnaire complete",
            _ => "Input required",
        }
    }

    fn invalid_choice(mode: InputMode) -> Self {
        let options = mode
            .choices()
            .iter()
            .map(Choice::label)
            .collect::<Vec<_>>()
            .join(", ");
        Self::InvalidChoice { options }
    }
}

/// What an accepted submission did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Moved to the main question at this index
    Advanced { index: usize },
    /// Photo check moved to the candidate at this cursor
    NextCandidate { cursor: usize },
    /// Last question answered; diagnoses are ready
    Resolved,
}

/// What the host should put on screen for the current step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub asset: Option<AssetRef>,
    pub mode: InputMode,
}

/// Data owned by one run. Holds no presentation handles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub current_question_index: usize,
    pub life_stage: Option<LifeStage>,
    pub answers: AnswerSequence,
    pub diagnoses: Vec<DiagnosisRecord>,
    pub deficiency_index: usize,
    pub resolved: bool,
}

/// A running questionnaire
#[derive(Debug, Clone)]
pub struct Session {
    sheet: QuestionSheet,
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::start()
    }
}

/// Start a session over the standard question sheet
pub fn start_session() -> Session {
    Session::start()
}

impl Session {
    /// Start a session over the standard question sheet
    pub fn start() -> Self {
        Self::with_sheet(QuestionSheet::standard())
    }

    /// Start a session over a custom sheet. An empty sheet resolves immediately.
    pub fn with_sheet(sheet: QuestionSheet) -> Self {
        info!(questions = sheet.len(), "Starting diagnosis session");
        let mut session = Self {
            sheet,
            state: SessionState::default(),
        };
        if session.sheet.is_empty() {
            session.resolve();
        }
        session
    }

    pub fn sheet(&self) -> &QuestionSheet {
        &self.sheet
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        if self.state.resolved {
            SessionPhase::Resolved
        } else {
            SessionPhase::Collecting(self.state.current_question_index)
        }
    }

    /// The question awaiting an answer, or `None` once the sequence is exhausted
    pub fn current_question(&self) -> Option<&QuestionSpec> {
        if self.state.resolved {
            return None;
        }
        self.sheet.get(self.state.current_question_index)
    }

    /// The deficiency photo currently being compared, during the photo check
    pub fn current_deficiency(&self) -> Option<&DeficiencyCandidate> {
        let question = self.current_question()?;
        if question.mode != InputMode::DeficiencyPhotoCheck {
            return None;
        }
        self.sheet.candidates().get(self.state.deficiency_index)
    }

    /// Text, image and input shape for the current step
    pub fn current_prompt(&self) -> Option<Prompt> {
        let question = self.current_question()?;
        if let Some(candidate) = self.current_deficiency() {
            return Some(Prompt {
                text: candidate.prompt(),
                asset: Some(candidate.asset),
                mode: question.mode,
            });
        }
        Some(Prompt {
            text: question.prompt.to_string(),
            asset: question.asset,
            mode: question.mode,
        })
    }

    /// 1-based position and total, for "Question i of n" displays
    pub fn progress(&self) -> (usize, usize) {
        let total = self.sheet.len();
        ((self.state.current_question_index + 1).min(total), total)
    }

    pub fn is_resolved(&self) -> bool {
        self.state.resolved
    }

    /// Diagnoses for this run.
    ///
    /// Complete once `is_resolved()`; before that it holds only notes added
    /// by the photo check.
    pub fn diagnoses(&self) -> &[DiagnosisRecord] {
        &self.state.diagnoses
    }

    /// Lowercase life stage token, or an empty string before the first answer
    pub fn life_stage(&self) -> &str {
        self.state.life_stage.map(|s| s.as_str()).unwrap_or("")
    }

    pub fn stage(&self) -> Option<LifeStage> {
        self.state.life_stage
    }

    pub fn answers(&self) -> &AnswerSequence {
        &self.state.answers
    }

    /// Validate and record an answer to the current step
    pub fn submit_answer(&mut self, input: RawInput) -> Result<Submission, ValidationError> {
        let question = *self
            .current_question()
            .ok_or(ValidationError::AlreadyResolved)?;

        if question.mode == InputMode::DeficiencyPhotoCheck {
            return self.submit_photo_check(input);
        }

        let answer = validate(question.mode, input).inspect_err(|e| {
            debug!(question = %question.id, error = %e, "Answer rejected");
        })?;

        if let Answer::Stage(stage) = answer {
            self.state.life_stage = Some(stage);
        }
        debug!(question = %question.id, answer = %answer, "Answer accepted");
        self.state.answers.push(question.id, answer);

        Ok(self.advance())
    }

    fn submit_photo_check(&mut self, input: RawInput) -> Result<Submission, ValidationError> {
        let choice = match input {
            RawInput::Choice(c @ (Choice::Yes | Choice::No)) => c,
            _ => return Err(ValidationError::invalid_choice(InputMode::DeficiencyPhotoCheck)),
        };

        let candidates = self.sheet.candidates();
        if let Some(candidate) = candidates.get(self.state.deficiency_index) {
            if choice == Choice::Yes {
                info!(candidate = candidate.name, "Deficiency photo matched");
                self.state
                    .diagnoses
                    .push(DiagnosisRecord::from_candidate(candidate));
            }
        }

        self.state.deficiency_index += 1;
        if self.state.deficiency_index < candidates.len() {
            return Ok(Submission::NextCandidate {
                cursor: self.state.deficiency_index,
            });
        }

        // Re-enterable on a later pass
        self.state.deficiency_index = 0;
        Ok(self.advance())
    }

    fn advance(&mut self) -> Submission {
        self.state.current_question_index += 1;
        if self.state.current_question_index >= self.sheet.len() {
            self.resolve();
            Submission::Resolved
        } else {
            Submission::Advanced {
                index: self.state.current_question_index,
            }
        }
    }

    fn resolve(&mut self) {
        let mut records = resolver::evaluate(&self.state.answers);
        let notes = std::mem::take(&mut self.state.diagnoses);
        records.extend(notes);
        info!(
            answers = self.state.answers.len(),
            diagnoses = records.len(),
            "Session resolved"
        );
        self.state.diagnoses = records;
        self.state.resolved = true;
    }
}

/// Check raw input against a question's input mode and turn it into an answer
pub fn validate(mode: InputMode, input: RawInput) -> Result<Answer, ValidationError> {
    match (mode, input) {
        (InputMode::LifeStage, RawInput::Stage(stage)) => Ok(Answer::Stage(stage)),
        (InputMode::LifeStage, RawInput::Text(text)) => text
            .trim()
            .parse::<LifeStage>()
            .map(Answer::Stage)
            .map_err(|_| ValidationError::LifeStage),
        (InputMode::LifeStage, _) => Err(ValidationError::LifeStage),

        (InputMode::Text, RawInput::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Err(ValidationError::MissingText)
            } else {
                Ok(Answer::Text(text.to_string()))
            }
        }
        (InputMode::Text, _) => Err(ValidationError::MissingText),

        (InputMode::Npk, RawInput::Npk { n, p, k }) => {
            let fields = [n.trim(), p.trim(), k.trim()];
            if fields.iter().any(|f| f.is_empty()) {
                return Err(ValidationError::MissingNpk);
            }
            Ok(Answer::Npk(fields.join(" ")))
        }
        (InputMode::Ph, RawInput::Ph { water, soil }) => {
            let (water, soil) = (water.trim(), soil.trim());
            if water.is_empty() || soil.is_empty() {
                return Err(ValidationError::MissingPh);
            }
            Ok(Answer::Ph(format!("Water pH: {}, Soil pH: {}", water, soil)))
        }

        (mode, RawInput::Choice(choice)) if mode.choices().contains(&choice) => {
            Ok(Answer::Choice(choice))
        }
        (InputMode::Npk, _) => Err(ValidationError::MissingNpk),
        (InputMode::Ph, _) => Err(ValidationError::MissingPh),
        (mode, _) => Err(ValidationError::invalid_choice(mode)),
    }
}
