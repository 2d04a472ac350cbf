//! Question sheet definitions
//!
//! The sheet is built once at startup and never reordered. The default sheet
//! mirrors the paper checklist growers already use: life stage, visible
//! symptoms, pests and disease, then feed, water and climate.

use crate::types::{InputMode, QuestionId};
use serde::Serialize;
use std::fmt;

/// Reference to an illustrative image, resolved by an `AssetResolver`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AssetRef(pub &'static str);

impl AssetRef {
    pub fn file_name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Static definition of one prompt and its expected input shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionSpec {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub asset: Option<AssetRef>,
    pub mode: InputMode,
}

impl QuestionSpec {
    pub const fn new(
        id: QuestionId,
        prompt: &'static str,
        asset: Option<&'static str>,
        mode: InputMode,
    ) -> Self {
        let asset = match asset {
            Some(name) => Some(AssetRef(name)),
            None => None,
        };
        Self {
            id,
            prompt,
            asset,
            mode,
        }
    }
}

/// One reference photo shown during the deficiency photo check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeficiencyCandidate {
    pub name: &'static str,
    pub asset: AssetRef,
    pub remedy: &'static str,
}

impl DeficiencyCandidate {
    /// Prompt shown while this candidate's photo is on screen
    pub fn prompt(&self) -> String {
        format!("Does this photo look like your leaves? ({})", self.name)
    }
}

const fn yes_no(id: QuestionId, prompt: &'static str, asset: Option<&'static str>) -> QuestionSpec {
    QuestionSpec::new(id, prompt, asset, InputMode::YesNo)
}

/// The default questionnaire, in asking order
pub const STANDARD_QUESTIONS: &[QuestionSpec] = &[
    QuestionSpec::new(
        QuestionId::LifeStage,
        "What stage of growth is your plant in? (Seedling, Vegetative, Flowering)",
        None,
        InputMode::LifeStage,
    ),
    yes_no(QuestionId::Drooping, "Is your plant drooping?", Some("drooping.jpg")),
    yes_no(
        QuestionId::YellowingLeaves,
        "Are the leaves yellowing?",
        Some("yellowing_leaves.jpg"),
    ),
    yes_no(
        QuestionId::CurlingLeaves,
        "Are the leaves curling?",
        Some("curling_leaves.jpg"),
    ),
    yes_no(
        QuestionId::BrownSpots,
        "Are there brown spots on the leaves?",
        Some("brown_spots.jpg"),
    ),
    yes_no(
        QuestionId::PurpleLeaves,
        "Are the leaves turning purple?",
        Some("purple_leaves.jpg"),
    ),
    yes_no(
        QuestionId::StuntedGrowth,
        "Is the growth stunted?",
        Some("stunted_growth.jpg"),
    ),
    yes_no(QuestionId::Pests, "Do you see pests on the plant?", Some("pests.jpg")),
    yes_no(
        QuestionId::Whiteflies,
        "Are there whiteflies on the plant?",
        Some("whiteflies.jpg"),
    ),
    yes_no(
        QuestionId::SpiderMites,
        "Are there spider mites on the plant?",
        Some("spider_mites.jpg"),
    ),
    yes_no(QuestionId::Aphids, "Are there aphids on the plant?", Some("aphids.jpg")),
    yes_no(QuestionId::Thrips, "Are there thrips on the plant?", Some("thrips.jpg")),
    yes_no(
        QuestionId::PowderyMildew,
        "Do the leaves have powdery mildew?",
        Some("powdery_mildew.jpg"),
    ),
    yes_no(
        QuestionId::BudRot,
        "Is there bud rot (gray mold) on the plant?",
        Some("bud_rot.jpg"),
    ),
    yes_no(QuestionId::RootRot, "Are there signs of root rot?", Some("root_rot.jpg")),
    QuestionSpec::new(
        QuestionId::FertilizerNpk,
        "What is your fertilizer NPK? (Enter N, P, and K values)",
        None,
        InputMode::Npk,
    ),
    QuestionSpec::new(
        QuestionId::WaterSoilPh,
        "What is the pH of the water and soil? (Enter water pH and soil pH)",
        None,
        InputMode::Ph,
    ),
    yes_no(
        QuestionId::TemperatureHigh,
        "Is the temperature in the grow space above 85°F (30°C)?",
        None,
    ),
    yes_no(
        QuestionId::TemperatureLow,
        "Is the temperature in the grow space below 70°F (20°C)?",
        None,
    ),
    yes_no(QuestionId::HumidityHigh, "Is the relative humidity above 60%?", None),
    yes_no(QuestionId::HumidityLow, "Is the relative humidity below 40%?", None),
    yes_no(
        QuestionId::CannabisNutrients,
        "Are you using cannabis-specific nutrients?",
        Some("cannabis_nutrients.jpg"),
    ),
    QuestionSpec::new(
        QuestionId::RoWater,
        "Are you using reverse osmosis (RO) water?",
        Some("ro_water.jpg"),
        InputMode::YesNoNotApplicable,
    ),
    QuestionSpec::new(
        QuestionId::CocoCoir,
        "Are you using coco coir as a growing medium?",
        Some("coco_coir.jpg"),
        InputMode::YesNoNotApplicable,
    ),
];

/// Composite step that walks the deficiency photos
pub const PHOTO_CHECK_QUESTION: QuestionSpec = QuestionSpec::new(
    QuestionId::DeficiencyPhotos,
    "Compare your leaves against the deficiency reference photos.",
    None,
    InputMode::DeficiencyPhotoCheck,
);

/// Optional free-text observation at the end of the sheet
pub const NOTES_QUESTION: QuestionSpec = QuestionSpec::new(
    QuestionId::Notes,
    "Anything else you have noticed about the plant?",
    None,
    InputMode::Text,
);

/// Reference photos for the photo check, in showing order
pub const DEFICIENCY_CANDIDATES: &[DeficiencyCandidate] = &[
    DeficiencyCandidate {
        name: "Nitrogen deficiency",
        asset: AssetRef("nitrogen_deficiency.jpg"),
        remedy: "Natural solution: Compost tea. Chemical solution: Nitrogen-rich fertilizer.",
    },
    DeficiencyCandidate {
        name: "Potassium deficiency",
        asset: AssetRef("potassium_deficiency.jpg"),
        remedy: "Increase potassium in the feed. Natural solution: Kelp meal. Chemical solution: Potash supplement.",
    },
    DeficiencyCandidate {
        name: "Magnesium deficiency",
        asset: AssetRef("magnesium_deficiency.jpg"),
        remedy: "Natural solution: Epsom salts. Chemical solution: Cal-Mag supplement.",
    },
    DeficiencyCandidate {
        name: "Phosphorus deficiency",
        asset: AssetRef("phosphorus_deficiency.jpg"),
        remedy: "Ensure proper phosphorus levels. Natural solution: Bone meal. Chemical solution: Bloom booster.",
    },
];

/// Ordered question list plus the deficiency candidates the composite step walks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSheet {
    questions: Vec<QuestionSpec>,
    candidates: Vec<DeficiencyCandidate>,
}

impl Default for QuestionSheet {
    fn default() -> Self {
        Self::standard()
    }
}

impl QuestionSheet {
    /// The default sheet, without the photo check
    pub fn standard() -> Self {
        Self::new(STANDARD_QUESTIONS.to_vec())
    }

    /// A custom sheet using the standard deficiency candidates
    pub fn new(questions: Vec<QuestionSpec>) -> Self {
        Self {
            questions,
            candidates: DEFICIENCY_CANDIDATES.to_vec(),
        }
    }

    /// Replace the deficiency candidates
    pub fn with_candidates(mut self, candidates: Vec<DeficiencyCandidate>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Insert the photo check right after the root rot question, or at the end
    /// if the sheet has no root rot question
    pub fn with_photo_check(mut self) -> Self {
        if self.position(QuestionId::DeficiencyPhotos).is_some() {
            return self;
        }
        let at = self
            .position(QuestionId::RootRot)
            .map(|i| i + 1)
            .unwrap_or(self.questions.len());
        self.questions.insert(at, PHOTO_CHECK_QUESTION);
        self
    }

    /// Append the free-text notes question
    pub fn with_notes(mut self) -> Self {
        if self.position(QuestionId::Notes).is_none() {
            self.questions.push(NOTES_QUESTION);
        }
        self
    }

    pub fn get(&self, index: usize) -> Option<&QuestionSpec> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn position(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionSpec> {
        self.questions.iter()
    }

    pub fn candidates(&self) -> &[DeficiencyCandidate] {
        &self.candidates
    }
}
