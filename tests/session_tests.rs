//! End-to-end tests for the questionnaire sequencer
//!
//! These tests drive whole sessions through the public API:
//! - Standard sheet walk-throughs and the resulting diagnoses
//! - Rejected inputs leave the session untouched
//! - The optional deficiency photo check
//! - Emailing a resolved session through the outbox

use plantdoc::answer::RawInput;
use plantdoc::questions::QuestionSheet;
use plantdoc::report::{OutboxDispatcher, Report, ReportDispatcher};
use plantdoc::session::{Session, Submission, ValidationError, start_session};
use plantdoc::types::{InputMode, LifeStage, QuestionId};
use tempfile::TempDir;

/// Answer everything after the current step with "no" (or skip fields)
fn finish_with_no(session: &mut Session) -> Submission {
    let mut last = None;
    while let Some(prompt) = session.current_prompt() {
        let input = match prompt.mode {
            InputMode::Npk | InputMode::Ph => RawInput::not_sure(),
            InputMode::Text => RawInput::text("nothing else"),
            _ => RawInput::no(),
        };
        last = Some(session.submit_answer(input).unwrap());
    }
    last.unwrap()
}

// =============================================================================
// Standard sheet
// =============================================================================

#[test]
fn test_fresh_session() {
    let session = start_session();
    assert!(!session.is_resolved());
    assert_eq!(session.life_stage(), "");
    assert!(session.diagnoses().is_empty());
    assert_eq!(session.progress(), (1, 24));
    assert_eq!(session.current_question().unwrap().id, QuestionId::LifeStage);
}

#[test]
fn test_yellowing_only_flowering() {
    let mut session = start_session();
    session.submit_answer(RawInput::text("Flowering")).unwrap();
    session.submit_answer(RawInput::no()).unwrap();
    session.submit_answer(RawInput::yes()).unwrap();
    assert_eq!(finish_with_no(&mut session), Submission::Resolved);

    assert!(session.is_resolved());
    assert_eq!(session.life_stage(), "flowering");
    let diagnoses = session.diagnoses();
    assert_eq!(diagnoses.len(), 1);
    assert_eq!(diagnoses[0].title, "Yellowing Leaves");
    assert!(diagnoses[0].remedy.contains("Nitrogen-rich fertilizer"));
}

#[test]
fn test_all_yes_gives_every_rule_in_order() {
    let mut session = start_session();
    session.submit_answer(RawInput::Stage(LifeStage::Seedling)).unwrap();
    for _ in 0..14 {
        session.submit_answer(RawInput::yes()).unwrap();
    }
    finish_with_no(&mut session);

    let titles: Vec<&str> = session.diagnoses().iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles.len(), 14);
    assert_eq!(titles.first(), Some(&"Drooping"));
    assert_eq!(titles.last(), Some(&"Root Rot"));
}

#[test]
fn test_not_sure_never_diagnoses() {
    let mut session = start_session();
    session.submit_answer(RawInput::Stage(LifeStage::Vegetative)).unwrap();
    for _ in 0..14 {
        session.submit_answer(RawInput::not_sure()).unwrap();
    }
    finish_with_no(&mut session);
    assert!(session.diagnoses().is_empty());
}

#[test]
fn test_typed_npk_and_ph_are_recorded() {
    let mut session = start_session();
    session.submit_answer(RawInput::Stage(LifeStage::Flowering)).unwrap();
    for _ in 0..14 {
        session.submit_answer(RawInput::no()).unwrap();
    }
    session.submit_answer(RawInput::npk(" 10 ", "5", "5")).unwrap();
    session.submit_answer(RawInput::ph("6.5", "6.8")).unwrap();

    let npk = session.answers().get(QuestionId::FertilizerNpk).unwrap();
    assert_eq!(npk.to_string(), "10 5 5");
    assert!(session.answers().get(QuestionId::WaterSoilPh).is_some());
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_invalid_stage_is_rejected_without_change() {
    let mut session = start_session();
    let err = session.submit_answer(RawInput::text("sprout")).unwrap_err();
    assert_eq!(err, ValidationError::LifeStage);
    assert_eq!(session.state().current_question_index, 0);
    assert!(session.answers().is_empty());
    assert_eq!(session.life_stage(), "");
}

#[test]
fn test_partial_npk_is_rejected() {
    let mut session = start_session();
    session.submit_answer(RawInput::Stage(LifeStage::Flowering)).unwrap();
    for _ in 0..14 {
        session.submit_answer(RawInput::no()).unwrap();
    }
    let before = session.state().clone();
    let err = session.submit_answer(RawInput::npk("10", "", "5")).unwrap_err();
    assert_eq!(err.to_string(), "Please enter all NPK values.");
    assert_eq!(session.state(), &before);
}

#[test]
fn test_not_applicable_only_on_cal_mag_questions() {
    let mut session = start_session();
    session.submit_answer(RawInput::Stage(LifeStage::Flowering)).unwrap();
    let err = session
        .submit_answer(RawInput::Choice(plantdoc::types::Choice::NotApplicable))
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidChoice { .. }));
}

#[test]
fn test_submit_after_resolution_is_rejected() {
    let mut session = start_session();
    session.submit_answer(RawInput::Stage(LifeStage::Seedling)).unwrap();
    finish_with_no(&mut session);
    let diagnoses = session.diagnoses().to_vec();

    assert_eq!(
        session.submit_answer(RawInput::yes()),
        Err(ValidationError::AlreadyResolved)
    );
    assert_eq!(session.diagnoses(), diagnoses.as_slice());
}

// =============================================================================
// Deficiency photo check
// =============================================================================

#[test]
fn test_photo_check_two_of_four() {
    let mut session = Session::with_sheet(QuestionSheet::standard().with_photo_check());
    assert_eq!(session.sheet().len(), 25);

    session.submit_answer(RawInput::Stage(LifeStage::Vegetative)).unwrap();
    for _ in 0..14 {
        session.submit_answer(RawInput::no()).unwrap();
    }

    let prompt = session.current_prompt().unwrap();
    assert_eq!(prompt.mode, InputMode::DeficiencyPhotoCheck);
    assert!(prompt.text.contains("Nitrogen deficiency"));

    assert_eq!(
        session.submit_answer(RawInput::yes()).unwrap(),
        Submission::NextCandidate { cursor: 1 }
    );
    session.submit_answer(RawInput::no()).unwrap();
    session.submit_answer(RawInput::yes()).unwrap();
    assert_eq!(
        session.submit_answer(RawInput::no()).unwrap(),
        Submission::Advanced { index: 16 }
    );
    assert_eq!(session.diagnoses().len(), 2);

    finish_with_no(&mut session);
    let titles: Vec<&str> = session.diagnoses().iter().map(|d| d.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Possible Nitrogen deficiency", "Possible Magnesium deficiency"]
    );
}

#[test]
fn test_photo_check_notes_follow_rule_matches() {
    let mut session = Session::with_sheet(QuestionSheet::standard().with_photo_check());
    session.submit_answer(RawInput::Stage(LifeStage::Flowering)).unwrap();
    session.submit_answer(RawInput::yes()).unwrap();
    for _ in 0..13 {
        session.submit_answer(RawInput::no()).unwrap();
    }
    session.submit_answer(RawInput::no()).unwrap();
    session.submit_answer(RawInput::no()).unwrap();
    session.submit_answer(RawInput::no()).unwrap();
    session.submit_answer(RawInput::yes()).unwrap();
    finish_with_no(&mut session);

    let titles: Vec<&str> = session.diagnoses().iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["Drooping", "Possible Phosphorus deficiency"]);
}

#[test]
fn test_photo_check_rejects_not_sure() {
    let mut session = Session::with_sheet(QuestionSheet::standard().with_photo_check());
    session.submit_answer(RawInput::Stage(LifeStage::Flowering)).unwrap();
    for _ in 0..14 {
        session.submit_answer(RawInput::no()).unwrap();
    }
    assert!(session.submit_answer(RawInput::not_sure()).is_err());
    assert_eq!(session.state().deficiency_index, 0);
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_resolved_session_written_to_outbox() {
    let dir = TempDir::new().unwrap();
    let mut session = start_session();
    session.submit_answer(RawInput::Stage(LifeStage::Flowering)).unwrap();
    session.submit_answer(RawInput::yes()).unwrap();
    finish_with_no(&mut session);

    let report = Report::for_session(
        &session,
        "grower@example.com",
        "plantdoc@localhost",
        "Cannabis Plant Diagnosis Results",
    )
    .unwrap();
    let outbox = OutboxDispatcher::new(dir.path());
    outbox.dispatch(&report).unwrap();

    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
    let message = std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
    assert!(message.contains("To: grower@example.com\r\n"));
    assert!(message.contains("Drooping:\r\nCheck for overwatering"));
    assert!(message.contains("Plant Stage: Flowering"));
}

#[test]
fn test_report_needs_an_address() {
    let mut session = start_session();
    session.submit_answer(RawInput::Stage(LifeStage::Flowering)).unwrap();
    finish_with_no(&mut session);
    assert!(Report::for_session(&session, "  ", "plantdoc@localhost", "subject").is_err());
}
