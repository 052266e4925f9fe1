//! Reader-facing insights: keyword list and extreme sentences.

use indexmap::IndexSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;

/// Insights extracted alongside the score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Insights {
    /// Distinct words in order of first appearance.
    pub keywords: Vec<String>,
    /// Sentence with the most tokens (first one wins ties).
    pub longest_sentence: String,
    /// Sentence with the fewest tokens (first one wins ties).
    pub shortest_sentence: String,
}

/// Build all insights for an essay's words and sentences.
pub fn extract_insights(words: &[String], sentences: &[String]) -> Insights {
    Insights {
        keywords: keywords(words),
        longest_sentence: longest_sentence(sentences),
        shortest_sentence: shortest_sentence(sentences),
    }
}

/// Distinct words, deduplicated in first-occurrence order.
///
/// No stopword filtering and no frequency ranking.
pub fn keywords(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(String::as_str)
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// The sentence with the highest token count, or `""` when there is none.
pub fn longest_sentence(sentences: &[String]) -> String {
    first_extreme(sentences, |candidate, best| candidate > best)
}

/// The sentence with the lowest token count, or `""` when there is none.
pub fn shortest_sentence(sentences: &[String]) -> String {
    first_extreme(sentences, |candidate, best| candidate < best)
}

/// Scan in document order, replacing the pick only on a strict improvement.
fn first_extreme(sentences: &[String], improves: impl Fn(usize, usize) -> bool) -> String {
    let mut best: Option<(&String, usize)> = None;
    for sentence in sentences {
        let length = text::tokenize_words(sentence).len();
        match best {
            Some((_, best_length)) if !improves(length, best_length) => {}
            _ => best = Some((sentence, length)),
        }
    }
    best.map(|(sentence, _)| sentence.clone()).unwrap_or_default()
}
