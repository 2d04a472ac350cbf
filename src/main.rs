//! plantdoc - Main entry point
//!
//! Parses the command line, sets up logging and hands off to either the
//! terminal UI or one of the headless subcommands.

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info};

use plantdoc::answer::RawInput;
use plantdoc::app::App;
use plantdoc::cli::{Cli, Commands};
use plantdoc::host::{ConsoleHost, run_scripted};
use plantdoc::report::Report;
use plantdoc::session::Session;
use plantdoc::settings::{DispatcherConfig, Settings};

const LOG_FILE: &str = "plantdoc.log";

/// Where log output goes
enum LogTarget {
    /// The TUI owns the terminal, so logs go to a file
    File,
    Stderr,
}

fn init_tracing(target: LogTarget) -> Result<()> {
    let default_level = match target {
        LogTarget::File => "info",
        LogTarget::Stderr => "warn",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("PLANTDOC_LOG")
        .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match target {
        LogTarget::File => {
            let file = File::create(LOG_FILE)
                .with_context(|| format!("Failed to create log file {}", LOG_FILE))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

/// Load settings and apply command-line overrides
fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::default(),
    };

    if let Some(dir) = &cli.assets_dir {
        settings.assets_dir = dir.clone();
    }
    if let Some(dir) = &cli.outbox {
        settings.dispatcher = DispatcherConfig::Outbox { dir: dir.clone() };
    }
    if cli.photo_check {
        settings.photo_check = true;
    }

    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let target = match cli.command {
        None | Some(Commands::Run) => LogTarget::File,
        Some(_) => LogTarget::Stderr,
    };
    init_tracing(target)?;
    info!("plantdoc starting up");
    debug!(?cli, "CLI arguments parsed");

    match &cli.command {
        None | Some(Commands::Run) => {
            let settings = load_settings(&cli)?;
            run_tui(&settings)
        }
        Some(Commands::Diagnose { answers, email }) => {
            let settings = load_settings(&cli)?;
            run_diagnose(&settings, answers, email.as_deref())
        }
        Some(Commands::Questions) => {
            let settings = load_settings(&cli)?;
            print_questions(&settings);
            Ok(())
        }
        Some(Commands::InitConfig { path }) => {
            Settings::default().save_to_file(path)?;
            println!("Wrote default settings to {}", path.display());
            Ok(())
        }
    }
}

/// Run the interactive questionnaire
fn run_tui(settings: &Settings) -> Result<()> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode().context("Failed to enable raw mode")?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let result = Terminal::new(backend)
        .context("Failed to create terminal")
        .and_then(|mut terminal| {
            let mut app = App::new(settings);
            app.run(&mut terminal).map_err(anyhow::Error::from)
        });

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    if let Err(e) = &result {
        error!(error = %e, "TUI exited with an error");
    }
    result
}

/// Replay an answers file and print the diagnosis
fn run_diagnose(settings: &Settings, answers_path: &Path, email: Option<&str>) -> Result<()> {
    let content = std::fs::read_to_string(answers_path)
        .with_context(|| format!("Failed to read answers from {:?}", answers_path))?;
    let inputs: Vec<RawInput> =
        serde_json::from_str(&content).context("Failed to parse answers JSON")?;
    info!(inputs = inputs.len(), path = %answers_path.display(), "Replaying answers");

    let mut session = Session::with_sheet(settings.question_sheet());
    let assets = settings.asset_resolver();
    let mut host = ConsoleHost::new(stdout().lock());
    let outcome = run_scripted(&mut session, inputs, &mut host, &assets)?;
    debug!(?outcome, "Scripted run finished");

    if !session.is_resolved() {
        anyhow::bail!(
            "Answers ran out at question {} of {}",
            session.progress().0,
            session.progress().1
        );
    }

    if let Some(address) = email {
        let report = Report::for_session(&session, address, &settings.sender, &settings.subject)?;
        let dispatcher = settings.report_dispatcher();
        dispatcher
            .dispatch(&report)
            .with_context(|| format!("Failed to send report via {}", dispatcher.describe()))?;
        println!("\nDiagnosis results sent to {}.", report.to);
    }

    Ok(())
}

fn print_questions(settings: &Settings) {
    let sheet = settings.question_sheet();
    for (i, question) in sheet.iter().enumerate() {
        let asset = question
            .asset
            .map(|a| format!(" [{}]", a))
            .unwrap_or_default();
        println!("{:>2}. ({}) {}{}", i + 1, question.mode, question.prompt, asset);
    }
    if settings.photo_check {
        println!();
        println!("Deficiency photos:");
        for candidate in sheet.candidates() {
            println!("    {} [{}]", candidate.name, candidate.asset);
        }
    }
}
