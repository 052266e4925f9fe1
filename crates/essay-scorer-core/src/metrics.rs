//! Lexical metrics derived from tokenized essays.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;

/// Distinct and total word counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VocabularyRichness {
    /// Number of distinct words.
    pub unique: usize,
    /// Number of words, repeats included.
    pub total: usize,
}

impl VocabularyRichness {
    /// Share of distinct words, in `0.0..=1.0`. Zero when there are no words.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.unique as f64 / self.total as f64
        }
    }
}

/// Count distinct and total words.
///
/// Words are expected to be case-normalized already (see [`text::extract_words`]).
pub fn vocabulary_richness(words: &[String]) -> VocabularyRichness {
    let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
    VocabularyRichness {
        unique: unique.len(),
        total: words.len(),
    }
}

/// Token count of each sentence, punctuation included.
pub fn sentence_lengths(sentences: &[String]) -> Vec<usize> {
    sentences
        .iter()
        .map(|s| text::tokenize_words(s).len())
        .collect()
}

/// Mean number of tokens per sentence, or `0.0` without sentences.
pub fn average_sentence_length(sentences: &[String]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let total: usize = sentence_lengths(sentences).iter().sum();
    total as f64 / sentences.len() as f64
}
