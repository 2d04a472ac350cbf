//! Error handling module for plantdoc
//!
//! Collaborator and sequencer errors keep their own types; this module wraps
//! them for the hosts so everything can travel through a single `Result`.
//! None of these is fatal to a session: validation errors re-prompt, asset and
//! dispatch errors degrade to a notice.

use crate::assets::AssetError;
use crate::report::DispatchError;
use crate::session::ValidationError;
use thiserror::Error;

/// Main error type for plantdoc
#[derive(Error, Debug)]
pub enum PlantDocError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected answer
    #[error("{title}: {0}", title = .0.title())]
    Validation(#[from] ValidationError),

    /// Image could not be resolved
    #[error("Asset unavailable: {0}")]
    Asset(#[from] AssetError),

    /// Report could not be delivered
    #[error("Report not sent: {0}")]
    Dispatch(#[from] DispatchError),

    /// Settings errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for plantdoc operations
pub type Result<T> = std::result::Result<T, PlantDocError>;

impl PlantDocError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }

    /// Whether the host should re-prompt the same question
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Validation(e) if *e != ValidationError::AlreadyResolved)
    }
}
