//! Diagnosis Resolver
//!
//! Maps a completed answer sequence to diagnosis records.
//!
//! # Design
//!
//! - **Pure logic**: no I/O, no side effects
//! - **Declaration order**: output follows rule order, which mirrors question order
//! - **Keyed by question id**: a rule reads the answer to one named question;
//!   a missing answer is simply "no match"
//!
//! # Rules
//!
//! | Question           | Diagnosis        |
//! |--------------------|------------------|
//! | `drooping`         | Drooping         |
//! | `yellowing_leaves` | Yellowing Leaves |
//! | `curling_leaves`   | Curling Leaves   |
//! | `brown_spots`      | Brown Spots      |
//! | `purple_leaves`    | Purple Leaves    |
//! | `stunted_growth`   | Stunted Growth   |
//! | `pests`            | Pests            |
//! | `whiteflies`       | Whiteflies       |
//! | `spider_mites`     | Spider Mites     |
//! | `aphids`           | Aphids           |
//! | `thrips`           | Thrips           |
//! | `powdery_mildew`   | Powdery Mildew   |
//! | `bud_rot`          | Bud Rot          |
//! | `root_rot`         | Root Rot         |

use crate::answer::{Answer, AnswerSequence};
use crate::questions::{AssetRef, DeficiencyCandidate};
use crate::types::QuestionId;
use serde::Serialize;
use tracing::debug;

/// One diagnosed issue with its remedy and illustration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisRecord {
    pub title: String,
    pub remedy: String,
    pub asset: AssetRef,
}

impl DiagnosisRecord {
    /// Note added when the grower matches a deficiency reference photo
    pub fn from_candidate(candidate: &DeficiencyCandidate) -> Self {
        Self {
            title: format!("Possible {}", candidate.name),
            remedy: candidate.remedy.to_string(),
            asset: candidate.asset,
        }
    }
}

/// A "yes to this question means this diagnosis" rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosisRule {
    pub question: QuestionId,
    /// Position of the question in the standard sheet
    pub position: usize,
    pub title: &'static str,
    pub remedy: &'static str,
    pub asset: AssetRef,
}

impl DiagnosisRule {
    pub fn record(&self) -> DiagnosisRecord {
        DiagnosisRecord {
            title: self.title.to_string(),
            remedy: self.remedy.to_string(),
            asset: self.asset,
        }
    }
}

/// The rule table, in output order
pub const RULES: &[DiagnosisRule] = &[
    DiagnosisRule {
        question: QuestionId::Drooping,
        position: 1,
        title: "Drooping",
        remedy: "Check for overwatering or underwatering. Adjust watering schedule accordingly.",
        asset: AssetRef("drooping.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::YellowingLeaves,
        position: 2,
        title: "Yellowing Leaves",
        remedy: "Possible nitrogen deficiency. Natural solution: Compost tea. Chemical solution: Nitrogen-rich fertilizer.",
        asset: AssetRef("yellowing_leaves.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::CurlingLeaves,
        position: 3,
        title: "Curling Leaves",
        remedy: "Check for heat stress or overfeeding. Adjust light distance and nutrient levels.",
        asset: AssetRef("curling_leaves.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::BrownSpots,
        position: 4,
        title: "Brown Spots",
        remedy: "Possible calcium or magnesium deficiency. Natural solution: Epsom salts. Chemical solution: Cal-Mag supplement.",
        asset: AssetRef("brown_spots.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::PurpleLeaves,
        position: 5,
        title: "Purple Leaves",
        remedy: "Could be due to genetics or phosphorus deficiency. Ensure proper phosphorus levels.",
        asset: AssetRef("purple_leaves.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::StuntedGrowth,
        position: 6,
        title: "Stunted Growth",
        remedy: "Check for root-bound plants or nutrient deficiencies. Repot if necessary, and adjust feeding schedule.",
        asset: AssetRef("stunted_growth.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::Pests,
        position: 7,
        title: "Pests",
        remedy: "Identify the pest and treat accordingly. Natural solution: Neem oil. Chemical solution: Insecticidal soap.",
        asset: AssetRef("pests.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::Whiteflies,
        position: 8,
        title: "Whiteflies",
        remedy: "Treat with yellow sticky traps and insecticidal soap.",
        asset: AssetRef("whiteflies.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::SpiderMites,
        position: 9,
        title: "Spider Mites",
        remedy: "Increase humidity and treat with miticides. Natural solution: Neem oil.",
        asset: AssetRef("spider_mites.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::Aphids,
        position: 10,
        title: "Aphids",
        remedy: "Natural solution: Ladybugs. Chemical solution: Insecticidal soap.",
        asset: AssetRef("aphids.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::Thrips,
        position: 11,
        title: "Thrips",
        remedy: "Use blue sticky traps and insecticidal soap.",
        asset: AssetRef("thrips.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::PowderyMildew,
        position: 12,
        title: "Powdery Mildew",
        remedy: "Increase air circulation and treat with fungicides. Natural solution: Milk spray.",
        asset: AssetRef("powdery_mildew.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::BudRot,
        position: 13,
        title: "Bud Rot",
        remedy: "Remove affected buds and increase air circulation.",
        asset: AssetRef("bud_rot.jpg"),
    },
    DiagnosisRule {
        question: QuestionId::RootRot,
        position: 14,
        title: "Root Rot",
        remedy: "Check for overwatering and ensure proper drainage. Treat with beneficial bacteria.",
        asset: AssetRef("root_rot.jpg"),
    },
];

/// Resolve diagnoses from answers keyed by question id.
///
/// A rule matches when its question was answered exactly `yes`.
pub fn evaluate(answers: &AnswerSequence) -> Vec<DiagnosisRecord> {
    RULES
        .iter()
        .filter(|rule| answers.get(rule.question).is_some_and(Answer::is_yes))
        .inspect(|rule| debug!(question = %rule.question, title = rule.title, "rule matched"))
        .map(DiagnosisRule::record)
        .collect()
}

/// Resolve diagnoses from a bare positional answer list.
///
/// Each rule reads the answer at its standard-sheet position; positions past
/// the end of the list never match.
pub fn evaluate_positional(answers: &[Answer]) -> Vec<DiagnosisRecord> {
    RULES
        .iter()
        .filter(|rule| answers.get(rule.position).is_some_and(Answer::is_yes))
        .map(DiagnosisRule::record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::{DEFICIENCY_CANDIDATES, QuestionSheet};
    use crate::types::{Choice, LifeStage};

    fn positional(yes_at: &[usize], len: usize) -> Vec<Answer> {
        let mut answers = vec![Answer::Stage(LifeStage::Seedling)];
        for i in 1..len {
            let c = if yes_at.contains(&i) { Choice::Yes } else { Choice::No };
            answers.push(Answer::Choice(c));
        }
        answers
    }

    fn keyed(answers: Vec<Answer>) -> AnswerSequence {
        let sheet = QuestionSheet::standard();
        AnswerSequence::from_ordered(sheet.iter().map(|q| q.id), answers)
    }

    #[test]
    fn test_rule_positions_match_standard_sheet() {
        let sheet = QuestionSheet::standard();
        for rule in RULES {
            assert_eq!(sheet.position(rule.question), Some(rule.position), "{}", rule.title);
        }
    }

    #[test]
    fn test_single_yes_yields_drooping() {
        let answers = positional(&[1], 24);
        let records = evaluate(&keyed(answers.clone()));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Drooping");
        assert_eq!(evaluate_positional(&answers), records);
    }

    #[test]
    fn test_output_follows_rule_order() {
        let answers = positional(&[14, 2, 7], 24);
        let titles: Vec<_> = evaluate(&keyed(answers))
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Yellowing Leaves", "Pests", "Root Rot"]);
    }

    #[test]
    fn test_short_sequence_only_in_range() {
        // Session ended after the curling question
        let answers = positional(&[1, 2, 3], 4);
        let records = evaluate_positional(&answers);
        assert_eq!(records.len(), 3);

        let answers = positional(&[1], 1);
        assert!(evaluate_positional(&answers).is_empty());
        assert!(evaluate_positional(&[]).is_empty());
    }

    #[test]
    fn test_only_exact_yes_matches() {
        let mut answers = positional(&[], 24);
        answers[1] = Answer::Choice(Choice::NotSure);
        answers[2] = Answer::Text("yes".into());
        answers[3] = Answer::Choice(Choice::NotApplicable);
        assert!(evaluate(&keyed(answers)).is_empty());
    }

    #[test]
    fn test_keyed_rules_survive_reordering() {
        let mut seq = AnswerSequence::new();
        seq.push(QuestionId::RootRot, Answer::Choice(Choice::Yes));
        seq.push(QuestionId::LifeStage, Answer::Stage(LifeStage::Flowering));
        seq.push(QuestionId::Drooping, Answer::Choice(Choice::Yes));

        let titles: Vec<_> = evaluate(&seq).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Drooping", "Root Rot"]);
    }

    #[test]
    fn test_candidate_note() {
        let note = DiagnosisRecord::from_candidate(&DEFICIENCY_CANDIDATES[2]);
        assert_eq!(note.title, "Possible Magnesium deficiency");
        assert_eq!(note.asset.file_name(), "magnesium_deficiency.jpg");
    }
}
