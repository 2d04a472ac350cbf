//! Tests for the terminal front end driven by key events
//!
//! These tests verify:
//! - Mode transitions between choice, field and results screens
//! - Typed input on NPK / pH fields
//! - Emailing results through an outbox, and failed deliveries

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use plantdoc::app::{App, AppMode};
use plantdoc::assets::NoAssets;
use plantdoc::questions::QuestionSheet;
use plantdoc::report::{DispatchError, OutboxDispatcher, Report, ReportDispatcher};
use plantdoc::settings::Settings;
use plantdoc::theme::Severity;
use tempfile::TempDir;

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn new_app(outbox: &TempDir, sheet: QuestionSheet) -> App {
    App::with_collaborators(
        sheet,
        Box::new(NoAssets),
        Box::new(OutboxDispatcher::new(outbox.path())),
        &Settings::default(),
    )
}

/// Stage 2, then "n" for the fourteen symptom questions
fn answer_symptoms_no(app: &mut App) {
    press(app, KeyCode::Char('2'));
    for _ in 0..14 {
        press(app, KeyCode::Char('n'));
    }
}

#[test]
fn test_field_screen_after_symptoms() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, QuestionSheet::standard());
    answer_symptoms_no(&mut app);

    assert_eq!(app.state().mode, AppMode::FieldQuestion);
    assert_eq!(app.state().field_labels(), &["N", "P", "K"]);
    assert_eq!(app.state().session.life_stage(), "vegetative");
}

#[test]
fn test_npk_fields_with_tab() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, QuestionSheet::standard());
    answer_symptoms_no(&mut app);

    type_text(&mut app, "10");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "5");
    press(&mut app, KeyCode::Enter);
    // K is still empty
    let notice = app.state().notice.clone().unwrap();
    assert_eq!(notice.message, "Please enter all NPK values.");
    assert_eq!(notice.severity, Severity::Warning);
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "5");
    press(&mut app, KeyCode::Enter);

    assert!(app.state().notice.is_none());
    assert_eq!(app.state().field_labels(), &["Water pH", "Soil pH"]);
    assert!(app.state().fields.iter().all(String::is_empty));
}

#[test]
fn test_full_run_to_results_and_email() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, QuestionSheet::standard());

    press(&mut app, KeyCode::Char('3'));
    press(&mut app, KeyCode::Char('n'));
    press(&mut app, KeyCode::Char('y'));
    for _ in 0..12 {
        press(&mut app, KeyCode::Char('n'));
    }
    press(&mut app, KeyCode::F(2));
    press(&mut app, KeyCode::F(2));
    for _ in 0..5 {
        press(&mut app, KeyCode::Char('s'));
    }
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Char('a'));

    assert_eq!(app.state().mode, AppMode::Results);
    let diagnoses = app.state().session.diagnoses();
    assert_eq!(diagnoses.len(), 1);
    assert_eq!(diagnoses[0].title, "Yellowing Leaves");
    assert_eq!(app.state().result_images, vec!["Image not found.".to_string()]);

    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.state().mode, AppMode::EmailEntry);
    type_text(&mut app, "grower@example.com");
    press(&mut app, KeyCode::Enter);

    let notice = app.state().notice.clone().unwrap();
    assert_eq!(notice.title, "Email Sent");
    assert_eq!(app.state().mode, AppMode::Results);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

    press(&mut app, KeyCode::Enter);
    assert!(press(&mut app, KeyCode::Char('q')));
}

#[test]
fn test_invalid_email_stays_on_entry() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, QuestionSheet::new(Vec::new()));
    assert_eq!(app.state().mode, AppMode::Results);

    press(&mut app, KeyCode::Char('e'));
    type_text(&mut app, "not-an-address");
    press(&mut app, KeyCode::Enter);

    let notice = app.state().notice.clone().unwrap();
    assert_eq!(notice.title, "Email Error");
    assert_eq!(app.state().mode, AppMode::EmailEntry);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state().mode, AppMode::Results);
}

#[test]
fn test_photo_check_buttons() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, QuestionSheet::standard().with_photo_check());
    answer_symptoms_no(&mut app);

    assert_eq!(app.state().mode, AppMode::ChoiceQuestion);
    assert_eq!(app.state().buttons(), vec!["Yes", "No"]);
    assert!(app.state().prompt().unwrap().text.contains("Nitrogen deficiency"));

    press(&mut app, KeyCode::Char('y'));
    assert!(app.state().prompt().unwrap().text.contains("Potassium deficiency"));
    assert_eq!(app.state().session.diagnoses().len(), 1);
}

/// Always fails the way an MTA that refused the message would
struct RefusingDispatcher;

impl ReportDispatcher for RefusingDispatcher {
    fn dispatch(&self, _report: &Report) -> Result<(), DispatchError> {
        Err(DispatchError::Command {
            program: "sendmail".to_string(),
            reason: "exit code 75: mailbox full".to_string(),
        })
    }

    fn describe(&self) -> String {
        "refusing".to_string()
    }
}

#[test]
fn test_failed_delivery_keeps_results() {
    let mut app = App::with_collaborators(
        QuestionSheet::standard(),
        Box::new(NoAssets),
        Box::new(RefusingDispatcher),
        &Settings::default(),
    );
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Char('y'));
    for _ in 0..13 {
        press(&mut app, KeyCode::Char('n'));
    }
    press(&mut app, KeyCode::F(2));
    press(&mut app, KeyCode::F(2));
    for _ in 0..5 {
        press(&mut app, KeyCode::Char('n'));
    }
    press(&mut app, KeyCode::Char('n'));
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.state().mode, AppMode::Results);
    let before = app.state().session.diagnoses().to_vec();
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].title, "Drooping");

    press(&mut app, KeyCode::Char('e'));
    type_text(&mut app, "grower@example.com");
    press(&mut app, KeyCode::Enter);

    let notice = app.state().notice.clone().unwrap();
    assert_eq!(notice.title, "Email Error");
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.message.contains("mailbox full"));
    assert_eq!(app.state().session.diagnoses(), before.as_slice());
    assert!(app.state().session.is_resolved());

    // Dismiss, then the address is still there to retry
    assert!(!press(&mut app, KeyCode::Enter));
    assert_eq!(app.state().mode, AppMode::EmailEntry);
    assert_eq!(app.state().email_input, "grower@example.com");
}

#[test]
fn test_results_scroll_is_clamped() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app(&dir, QuestionSheet::new(Vec::new()));
    press(&mut app, KeyCode::Up);
    assert_eq!(app.state().results_scroll, 0);

    // "No problems", blank line, "Plant Stage"
    press(&mut app, KeyCode::Down);
    assert_eq!(app.state().results_scroll, 1);
    for _ in 0..5 {
        press(&mut app, KeyCode::Down);
    }
    assert_eq!(app.state().results_scroll, 2);
    press(&mut app, KeyCode::PageDown);
    assert_eq!(app.state().results_scroll, 2);

    press(&mut app, KeyCode::PageUp);
    assert_eq!(app.state().results_scroll, 0);
}
