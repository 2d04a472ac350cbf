//! Host capability set
//!
//! The sequencer never draws anything. A `Host` is whatever puts questions,
//! images and results in front of the grower: the ratatui front end, or the
//! line-oriented `ConsoleHost` used for scripted runs.

use crate::answer::RawInput;
use crate::assets::{Asset, AssetError, AssetResolver};
use crate::error::Result;
use crate::questions::AssetRef;
use crate::session::{Prompt, Session};
use std::io::{self, Write};
use tracing::warn;

pub trait Host {
    fn show_question(&mut self, prompt: &Prompt, progress: (usize, usize)) -> io::Result<()>;

    fn show_image(
        &mut self,
        asset: &AssetRef,
        image: std::result::Result<Asset, AssetError>,
    ) -> io::Result<()>;

    fn show_notice(&mut self, title: &str, message: &str) -> io::Result<()>;

    fn show_results(&mut self, session: &Session, assets: &dyn AssetResolver) -> io::Result<()>;
}

/// Writes everything as plain text lines
pub struct ConsoleHost<W: Write> {
    out: W,
}

impl<W: Write> ConsoleHost<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Host for ConsoleHost<W> {
    fn show_question(&mut self, prompt: &Prompt, progress: (usize, usize)) -> io::Result<()> {
        writeln!(self.out, "[{}/{}] {}", progress.0, progress.1, prompt.text)
    }

    fn show_image(
        &mut self,
        asset: &AssetRef,
        image: std::result::Result<Asset, AssetError>,
    ) -> io::Result<()> {
        match image {
            Ok(found) => writeln!(self.out, "      image: {}", found.summary()),
            Err(e) => {
                warn!(asset = %asset, error = %e, "Asset unavailable");
                writeln!(self.out, "      {}", e.placeholder())
            }
        }
    }

    fn show_notice(&mut self, title: &str, message: &str) -> io::Result<()> {
        writeln!(self.out, "  ! {}: {}", title, message)
    }

    fn show_results(&mut self, session: &Session, assets: &dyn AssetResolver) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Diagnosis:")?;
        if session.diagnoses().is_empty() {
            writeln!(self.out, "No problems were identified from your answers.")?;
        }
        for record in session.diagnoses() {
            writeln!(self.out, "{}:", record.title)?;
            writeln!(self.out, "{}", record.remedy)?;
            writeln!(self.out, "  [{}]", assets.describe(&record.asset))?;
            writeln!(self.out)?;
        }
        let stage = session.stage().map(|s| s.label()).unwrap_or("Unknown");
        writeln!(self.out, "Plant Stage: {}", stage)
    }
}

/// Counts from a scripted run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptOutcome {
    pub accepted: usize,
    pub rejected: usize,
    /// Inputs left over after the session resolved
    pub ignored: usize,
}

/// Feed a list of inputs through a session, showing each step on a host.
///
/// Rejected inputs are shown as notices and the same question stays current,
/// exactly as a person re-answering would see it.
pub fn run_scripted<H: Host>(
    session: &mut Session,
    inputs: impl IntoIterator<Item = RawInput>,
    host: &mut H,
    assets: &dyn AssetResolver,
) -> Result<ScriptOutcome> {
    let mut outcome = ScriptOutcome::default();

    for input in inputs {
        let Some(prompt) = session.current_prompt() else {
            outcome.ignored += 1;
            continue;
        };

        host.show_question(&prompt, session.progress())?;
        if let Some(asset) = prompt.asset {
            host.show_image(&asset, assets.resolve(&asset))?;
        }

        match session.submit_answer(input) {
            Ok(_) => outcome.accepted += 1,
            Err(e) => {
                outcome.rejected += 1;
                host.show_notice(e.title(), &e.to_string())?;
            }
        }
    }

    if outcome.ignored > 0 {
        warn!(ignored = outcome.ignored, "Inputs after the last question were ignored");
    }

    if session.is_resolved() {
        host.show_results(session, assets)?;
    } else {
        host.show_notice(
            "Incomplete",
            &format!("Stopped at question {} of {}.", session.progress().0, session.progress().1),
        )?;
    }

    Ok(outcome)
}
