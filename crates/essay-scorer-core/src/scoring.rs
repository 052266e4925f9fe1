//! Score aggregation.
//!
//! ```text
//! score = clamp(
//!     (unique / total) * 30        // only when total > 0
//!   + average_sentence_length * 2
//!   + characters / 100,
//!   0, 100)
//! ```
//!
//! The weights are a fixed heuristic, not a validated rubric. Changing them
//! changes every published score.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::metrics::VocabularyRichness;

/// Weight of the distinct-word ratio. Caps the vocabulary component at 30.
pub const VOCABULARY_WEIGHT: f64 = 30.0;

/// Points per average token in a sentence.
pub const SENTENCE_LENGTH_WEIGHT: f64 = 2.0;

/// Characters of raw text per point.
pub const CHARACTERS_PER_POINT: f64 = 100.0;

/// Upper bound of the final score.
pub const MAX_SCORE: f64 = 100.0;

/// The score's components before clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreBreakdown {
    /// Vocabulary diversity component, `0..=30`.
    pub vocabulary: f64,
    /// Sentence complexity component.
    pub sentence_complexity: f64,
    /// Raw length component.
    pub length: f64,
    /// Sum of the components, not yet clamped.
    pub raw: f64,
}

impl ScoreBreakdown {
    /// Final score, clamped to `0..=100`.
    pub fn score(&self) -> f64 {
        self.raw.clamp(0.0, MAX_SCORE)
    }
}

/// Whether `value` can be compared against a score (finite, `0..=100`).
pub fn is_valid_score(value: f64) -> bool {
    value.is_finite() && (0.0..=MAX_SCORE).contains(&value)
}

/// Combine the metrics into a score breakdown.
///
/// `character_count` is the length of the scored text in characters,
/// whitespace and punctuation included.
pub fn aggregate(
    richness: VocabularyRichness,
    average_sentence_length: f64,
    character_count: usize,
) -> ScoreBreakdown {
    let vocabulary = if richness.total > 0 {
        richness.ratio() * VOCABULARY_WEIGHT
    } else {
        0.0
    };
    let sentence_complexity = average_sentence_length * SENTENCE_LENGTH_WEIGHT;
    let length = character_count as f64 / CHARACTERS_PER_POINT;

    ScoreBreakdown {
        vocabulary,
        sentence_complexity,
        length,
        raw: vocabulary + sentence_complexity + length,
    }
}
