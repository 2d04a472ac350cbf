//! Answers collected by the sequencer and the raw input hosts submit

use crate::types::{Choice, LifeStage, QuestionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the host hands to `Session::submit_answer`.
///
/// The JSON form is used by answer scripts for headless runs, e.g.
/// `{"choice": "yes"}`, `{"stage": "flowering"}`, `{"npk": {"n": "10", "p": "5", "k": "5"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawInput {
    Choice(Choice),
    Stage(LifeStage),
    Text(String),
    Npk { n: String, p: String, k: String },
    Ph { water: String, soil: String },
}

impl RawInput {
    pub fn yes() -> Self {
        Self::Choice(Choice::Yes)
    }

    pub fn no() -> Self {
        Self::Choice(Choice::No)
    }

    pub fn not_sure() -> Self {
        Self::Choice(Choice::NotSure)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn npk(n: impl Into<String>, p: impl Into<String>, k: impl Into<String>) -> Self {
        Self::Npk {
            n: n.into(),
            p: p.into(),
            k: k.into(),
        }
    }

    pub fn ph(water: impl Into<String>, soil: impl Into<String>) -> Self {
        Self::Ph {
            water: water.into(),
            soil: soil.into(),
        }
    }
}

/// A validated answer to one main-sequence question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Text(String),
    Choice(Choice),
    Stage(LifeStage),
    /// Joined as `"N P K"`
    Npk(String),
    /// Joined as `"Water pH: X, Soil pH: Y"`
    Ph(String),
}

impl Answer {
    /// Textual form, matching what a grower would read back on the report
    pub fn token(&self) -> &str {
        match self {
            Self::Text(s) | Self::Npk(s) | Self::Ph(s) => s,
            Self::Choice(c) => c.as_str(),
            Self::Stage(s) => s.as_str(),
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Choice(Choice::Yes))
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Ordered answers to the main question sequence, each tagged with the
/// question it answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerSequence {
    entries: Vec<(QuestionId, Answer)>,
}

impl AnswerSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a plain list of answers with question ids in sheet order.
    ///
    /// Extra answers beyond the id list are dropped.
    pub fn from_ordered(
        ids: impl IntoIterator<Item = QuestionId>,
        answers: impl IntoIterator<Item = Answer>,
    ) -> Self {
        Self {
            entries: ids.into_iter().zip(answers).collect(),
        }
    }

    pub fn push(&mut self, id: QuestionId, answer: Answer) {
        self.entries.push((id, answer));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Answer at a sequence position, if any
    pub fn at(&self, position: usize) -> Option<&Answer> {
        self.entries.get(position).map(|(_, a)| a)
    }

    /// Answer given to a question, if it has been answered
    pub fn get(&self, id: QuestionId) -> Option<&Answer> {
        self.entries
            .iter()
            .find(|(qid, _)| *qid == id)
            .map(|(_, a)| a)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(QuestionId, Answer)> {
        self.entries.iter()
    }

    /// Answers without their ids, in order
    pub fn answers(&self) -> Vec<Answer> {
        self.entries.iter().map(|(_, a)| a.clone()).collect()
    }
}
