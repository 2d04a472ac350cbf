//! plantdoc library
//!
//! The questionnaire engine (question sheet, sequencer, resolver) plus the
//! collaborators and hosts that put it in front of a grower.

pub mod answer;
pub mod app;
pub mod assets;
pub mod cli;
pub mod components;
pub mod error;
pub mod host;
pub mod logic;
pub mod questions;
pub mod report;
pub mod session;
pub mod settings;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use answer::{Answer, AnswerSequence, RawInput};
pub use assets::{Asset, AssetError, AssetResolver, FsAssetResolver, NoAssets};
pub use error::PlantDocError;
pub use host::{ConsoleHost, Host, ScriptOutcome, run_scripted};
pub use logic::resolver::{DiagnosisRecord, DiagnosisRule, RULES, evaluate, evaluate_positional};
pub use questions::{AssetRef, DeficiencyCandidate, QuestionSheet, QuestionSpec};
pub use report::{DispatchError, OutboxDispatcher, Report, ReportDispatcher, SendmailDispatcher};
pub use session::{
    Prompt, Session, SessionPhase, SessionState, Submission, ValidationError, start_session,
};
pub use settings::{DispatcherConfig, Settings};
pub use types::{Choice, InputMode, LifeStage, QuestionId};
