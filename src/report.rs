//! Diagnosis reports and their delivery
//!
//! A `Report` is the plain-text summary of a resolved session addressed to a
//! grower. Delivery goes through a `ReportDispatcher`, so the hosts never know
//! whether the message ends up in a spool directory or a local MTA.
//!
//! # Failure Modes
//!
//! - Missing or malformed address: rejected before anything is written
//! - Spool directory not writable: `DispatchError::Io`
//! - sendmail cannot be spawned, exits non-zero or stops reading the message:
//!   `DispatchError::Command`, carrying the exit status and stderr
//!
//! All of these are reported to the user as a notice; the diagnoses stay put.

use crate::logic::resolver::DiagnosisRecord;
use crate::session::Session;
use crate::types::LifeStage;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_SUBJECT: &str = "Cannabis Plant Diagnosis Results";

/// Why a report was not delivered
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Please provide an email address.")]
    MissingAddress,

    #[error("'{0}' is not a valid email address.")]
    InvalidAddress(String),

    #[error("could not write report: {0}")]
    Io(#[from] io::Error),

    #[error("{program} failed: {reason}")]
    Command { program: String, reason: String },
}

/// Check an address is usable as a single mail header value
pub fn validate_address(address: &str) -> Result<&str, DispatchError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(DispatchError::MissingAddress);
    }
    let valid = match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !address.chars().any(|c| c.is_whitespace() || c.is_control())
        }
        None => false,
    };
    if valid {
        Ok(address)
    } else {
        Err(DispatchError::InvalidAddress(address.to_string()))
    }
}

/// Plain-text body listing each diagnosis and the plant stage
pub fn format_body(diagnoses: &[DiagnosisRecord], stage: Option<LifeStage>) -> String {
    let mut body = String::new();
    if diagnoses.is_empty() {
        body.push_str("No problems were identified from your answers.\n\n");
    }
    for record in diagnoses {
        body.push_str(&format!("{}:\n{}\n\n", record.title, record.remedy));
    }
    body.push_str(&format!(
        "Plant Stage: {}\n",
        stage.map(|s| s.label()).unwrap_or("Unknown")
    ));
    body
}

/// An addressed diagnosis report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

impl Report {
    /// Build a report for a resolved session
    pub fn for_session(
        session: &Session,
        to: &str,
        from: &str,
        subject: &str,
    ) -> Result<Self, DispatchError> {
        let to = validate_address(to)?;
        Ok(Self {
            to: to.to_string(),
            from: from.to_string(),
            subject: subject.to_string(),
            body: format_body(session.diagnoses(), session.stage()),
        })
    }

    /// RFC 5322 message text
    pub fn to_message(&self) -> String {
        format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nMIME-Version: 1.0\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n{}",
            self.from,
            self.to,
            self.subject,
            self.body.replace('\n', "\r\n")
        )
    }
}

/// Delivers a report to its recipient
pub trait ReportDispatcher {
    fn dispatch(&self, report: &Report) -> Result<(), DispatchError>;

    /// Short description for status lines
    fn describe(&self) -> String;
}

/// Writes each report as an `.eml` file into a spool directory
#[derive(Debug, Clone)]
pub struct OutboxDispatcher {
    dir: PathBuf,
}

impl OutboxDispatcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// One past the highest number already used in the spool
    fn next_number(&self) -> Result<u32, DispatchError> {
        let highest = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let stem = name.strip_suffix(".eml")?;
                stem.split('-').next()?.parse::<u32>().ok()
            })
            .max()
            .unwrap_or(0);
        Ok(highest + 1)
    }

    /// Create the next numbered file; never replaces an existing report
    fn create_next(&self, to: &str) -> Result<(PathBuf, fs::File), DispatchError> {
        let recipient: String = to
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
            .collect();
        let mut number = self.next_number()?;
        loop {
            let path = self.dir.join(format!("{:04}-{}.eml", number, recipient));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "Spool slot taken, trying the next one");
                    number += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl ReportDispatcher for OutboxDispatcher {
    fn dispatch(&self, report: &Report) -> Result<(), DispatchError> {
        validate_address(&report.to)?;
        fs::create_dir_all(&self.dir)?;
        let (path, mut file) = self.create_next(&report.to)?;
        file.write_all(report.to_message().as_bytes())?;
        info!(path = %path.display(), to = %report.to, "Report written to outbox");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("outbox {}", self.dir.display())
    }
}

/// Pipes each report into a sendmail-compatible program (`sendmail -t -i`)
#[derive(Debug, Clone)]
pub struct SendmailDispatcher {
    program: String,
}

impl SendmailDispatcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command_error(&self, reason: impl Into<String>) -> DispatchError {
        DispatchError::Command {
            program: self.program.clone(),
            reason: reason.into(),
        }
    }
}

impl ReportDispatcher for SendmailDispatcher {
    fn dispatch(&self, report: &Report) -> Result<(), DispatchError> {
        validate_address(&report.to)?;
        debug!(program = %self.program, to = %report.to, "Spawning mail transfer agent");

        let mut child = Command::new(&self.program)
            .args(["-t", "-i"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.command_error(e.to_string()))?;

        // The pipe closes when `stdin` drops, before waiting on the child
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(report.to_message().as_bytes()),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match output.status.code() {
                Some(code) if stderr.trim().is_empty() => format!("exit code {}", code),
                Some(code) => format!("exit code {}: {}", code, stderr.trim()),
                None => "terminated by signal".to_string(),
            };
            return Err(self.command_error(reason));
        }
        written.map_err(|e| self.command_error(format!("did not read the whole message: {}", e)))?;

        info!(to = %report.to, "Report handed to {}", self.program);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sendmail via {}", self.program)
    }
}
