//! Type-safe questionnaire tokens
//!
//! Answers and question tags are proper Rust enums rather than loose strings,
//! so the sequencer and resolver can match on them exhaustively.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Growth stage of the plant, asked by the first question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LifeStage {
    Seedling,
    Vegetative,
    Flowering,
}

impl LifeStage {
    pub const ALL: [LifeStage; 3] = [Self::Seedling, Self::Vegetative, Self::Flowering];

    /// Lowercase token, as stored in the session
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seedling => "seedling",
            Self::Vegetative => "vegetative",
            Self::Flowering => "flowering",
        }
    }

    /// Capitalized label for buttons and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Seedling => "Seedling",
            Self::Vegetative => "Vegetative",
            Self::Flowering => "Flowering",
        }
    }
}

/// Categorical answer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Choice {
    Yes,
    No,
    NotSure,
    NotApplicable,
}

impl Choice {
    /// Wire token (`yes`, `no`, `not_sure`, `not_applicable`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::NotSure => "not_sure",
            Self::NotApplicable => "not_applicable",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::NotSure => "Not Sure",
            Self::NotApplicable => "Not Applicable",
        }
    }
}

/// Input shape a question expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InputMode {
    /// Yes / No / Not Sure buttons
    YesNo,
    /// Seedling / Vegetative / Flowering, or the same typed as text
    LifeStage,
    /// Three fields: N, P and K
    Npk,
    /// Two fields: water pH and soil pH
    Ph,
    /// Iterates the deficiency photos, yes/no per photo
    DeficiencyPhotoCheck,
    /// Yes / No / Not Sure / Not Applicable buttons
    YesNoNotApplicable,
    /// Free text, must be non-empty
    Text,
}

impl InputMode {
    /// Choices accepted by the button-driven modes.
    ///
    /// Field-driven modes (`Npk`, `Ph`) accept `NotSure` as a skip; `Text` and
    /// `LifeStage` accept no choice at all.
    pub fn choices(&self) -> &'static [Choice] {
        match self {
            Self::YesNo => &[Choice::Yes, Choice::No, Choice::NotSure],
            Self::YesNoNotApplicable => &[
                Choice::Yes,
                Choice::No,
                Choice::NotSure,
                Choice::NotApplicable,
            ],
            Self::DeficiencyPhotoCheck => &[Choice::Yes, Choice::No],
            Self::Npk | Self::Ph => &[Choice::NotSure],
            Self::LifeStage | Self::Text => &[],
        }
    }

    /// Whether this mode collects typed fields instead of button presses
    pub fn takes_fields(&self) -> bool {
        matches!(self, Self::LifeStage | Self::Npk | Self::Ph | Self::Text)
    }
}

/// Stable identifier for every question in the sheet.
///
/// Diagnosis rules key off these instead of list positions, so inserting or
/// reordering questions never shifts which answer a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QuestionId {
    LifeStage,
    Drooping,
    YellowingLeaves,
    CurlingLeaves,
    BrownSpots,
    PurpleLeaves,
    StuntedGrowth,
    Pests,
    Whiteflies,
    SpiderMites,
    Aphids,
    Thrips,
    PowderyMildew,
    BudRot,
    RootRot,
    DeficiencyPhotos,
    FertilizerNpk,
    WaterSoilPh,
    TemperatureHigh,
    TemperatureLow,
    HumidityHigh,
    HumidityLow,
    CannabisNutrients,
    RoWater,
    CocoCoir,
    Notes,
}
