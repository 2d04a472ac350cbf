//! Settings file handling
//!
//! Settings are a small JSON document. Every field has a default, so a file
//! only needs the values it changes; unknown fields are ignored.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::FsAssetResolver;
use crate::questions::QuestionSheet;
use crate::report::{DEFAULT_SUBJECT, OutboxDispatcher, ReportDispatcher, SendmailDispatcher};

/// How finished reports are delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatcherConfig {
    /// Write `.eml` files into a directory
    Outbox { dir: PathBuf },
    /// Pipe messages to a sendmail-compatible program
    Sendmail { program: String },
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::Outbox {
            dir: PathBuf::from("outbox"),
        }
    }
}

/// Runtime settings for both hosts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the question and diagnosis images
    pub assets_dir: PathBuf,
    /// `From:` address on emailed reports
    pub sender: String,
    /// `Subject:` line on emailed reports
    pub subject: String,
    pub dispatcher: DispatcherConfig,
    /// Ask the deficiency photo check after the root rot question
    pub photo_check: bool,
    /// Finish with a free-text observations question
    pub notes_question: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("images"),
            sender: "plantdoc@localhost".to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            dispatcher: DispatcherConfig::default(),
            photo_check: false,
            notes_question: false,
        }
    }
}

impl Settings {
    /// Save settings to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize settings to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write settings to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path.as_ref()))?;

        let settings: Self =
            serde_json::from_str(&content).context("Failed to parse settings JSON")?;

        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.assets_dir.as_os_str().is_empty() {
            anyhow::bail!("Assets directory must be specified");
        }

        let sender = self.sender.trim();
        if sender.is_empty() {
            anyhow::bail!("Sender address must be specified");
        }
        if crate::report::validate_address(sender).is_err() {
            anyhow::bail!("Sender '{}' is not a valid email address", sender);
        }

        if self.subject.trim().is_empty() {
            anyhow::bail!("Report subject must not be empty");
        }
        if self.subject.contains(['\r', '\n']) {
            anyhow::bail!("Report subject must be a single line");
        }

        match &self.dispatcher {
            DispatcherConfig::Outbox { dir } if dir.as_os_str().is_empty() => {
                anyhow::bail!("Outbox directory must be specified");
            }
            DispatcherConfig::Sendmail { program } if program.trim().is_empty() => {
                anyhow::bail!("Sendmail program must be specified");
            }
            _ => {}
        }

        Ok(())
    }

    /// Question sheet these settings ask for
    pub fn question_sheet(&self) -> QuestionSheet {
        let mut sheet = QuestionSheet::standard();
        if self.photo_check {
            sheet = sheet.with_photo_check();
        }
        if self.notes_question {
            sheet = sheet.with_notes();
        }
        sheet
    }

    pub fn asset_resolver(&self) -> FsAssetResolver {
        FsAssetResolver::new(&self.assets_dir)
    }

    pub fn report_dispatcher(&self) -> Box<dyn ReportDispatcher> {
        match &self.dispatcher {
            DispatcherConfig::Outbox { dir } => Box::new(OutboxDispatcher::new(dir)),
            DispatcherConfig::Sendmail { program } => {
                Box::new(SendmailDispatcher::new(program.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuestionId;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plantdoc.json");

        let settings = Settings {
            photo_check: true,
            dispatcher: DispatcherConfig::Sendmail {
                program: "/usr/sbin/sendmail".into(),
            },
            ..Settings::default()
        };
        settings.save_to_file(&path).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"assets_dir": "pics", "unknown_future_field": 1}"#).unwrap();
        assert_eq!(settings.assets_dir, PathBuf::from("pics"));
        assert_eq!(settings.subject, DEFAULT_SUBJECT);
        assert_eq!(settings.dispatcher, DispatcherConfig::default());
    }

    #[test]
    fn test_dispatcher_json_shape() {
        let settings: Settings =
            serde_json::from_str(r#"{"dispatcher": {"kind": "outbox", "dir": "/var/spool/plantdoc"}}"#)
                .unwrap();
        assert_eq!(
            settings.dispatcher,
            DispatcherConfig::Outbox {
                dir: PathBuf::from("/var/spool/plantdoc")
            }
        );
    }

    #[test]
    fn test_invalid_sender_rejected() {
        let settings = Settings {
            sender: "nobody".into(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_multiline_subject_rejected() {
        let settings = Settings {
            subject: "Results\nBcc: someone@example.com".into(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_sendmail_program_rejected() {
        let settings = Settings {
            dispatcher: DispatcherConfig::Sendmail {
                program: " ".into(),
            },
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_question_sheet_options() {
        let plain = Settings::default().question_sheet();
        assert!(plain.position(QuestionId::DeficiencyPhotos).is_none());

        let settings = Settings {
            photo_check: true,
            notes_question: true,
            ..Settings::default()
        };
        let sheet = settings.question_sheet();
        assert!(sheet.position(QuestionId::DeficiencyPhotos).is_some());
        assert_eq!(sheet.position(QuestionId::Notes), Some(sheet.len() - 1));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Settings::load_from_file(dir.path().join("missing.json")).is_err());
    }
}
