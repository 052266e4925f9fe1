//! Essay analysis pipeline.
//!
//! Raw text is tokenized into words and sentences, measured, aggregated into
//! a bounded score, and returned together with insights as an
//! [`EssayReport`]. Analysis is pure: the same input always yields the same
//! report and nothing is retained between calls.

use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisResult;
use crate::insights;
use crate::markdown::EssayFormat;
use crate::metrics;
use crate::scoring::{self, ScoreBreakdown};
use crate::text::Tokenizer;

/// Result of scoring one essay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EssayReport {
    /// Heuristic score in `0..=100`.
    pub score: f64,
    /// Number of distinct words.
    pub unique_word_count: usize,
    /// Number of words, repeats included.
    pub total_word_count: usize,
    /// Mean tokens per sentence (`0.0` without sentences).
    pub average_sentence_length: f64,
    /// Number of sentences detected.
    pub sentence_count: usize,
    /// Length of the scored text in characters.
    pub character_count: usize,
    /// Distinct words in order of first appearance.
    pub keywords: Vec<String>,
    /// Sentence with the most tokens.
    pub longest_sentence: String,
    /// Sentence with the fewest tokens.
    pub shortest_sentence: String,
    /// Score components before clamping.
    pub breakdown: ScoreBreakdown,
}

impl EssayReport {
    /// The first `limit` keywords, for display.
    pub fn top_keywords(&self, limit: usize) -> &[String] {
        &self.keywords[..limit.min(self.keywords.len())]
    }
}

/// Scores essays with a prepared tokenizer.
///
/// Construction is the only step that can fail; analysis cannot.
#[derive(Debug, Clone, Default)]
pub struct EssayAnalyzer {
    tokenizer: Tokenizer,
}

impl EssayAnalyzer {
    /// Create an analyzer with the built-in tokenizer resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer whose sentence splitter knows extra abbreviations.
    pub fn with_abbreviations<I, S>(extra: I) -> AnalysisResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            tokenizer: Tokenizer::with_abbreviations(extra)?,
        })
    }

    /// The tokenizer used by this analyzer.
    pub const fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Score a plain-text essay.
    ///
    /// Blank input yields a zero-valued report.
    #[tracing::instrument(skip_all, fields(text_len = essay.len()))]
    pub fn analyze(&self, essay: &str) -> EssayReport {
        if essay.trim().is_empty() {
            tracing::debug!("blank essay, returning empty report");
            return EssayReport::default();
        }

        let tokens = self.tokenizer.preprocess(essay);
        let richness = metrics::vocabulary_richness(&tokens.words);
        let average_sentence_length = metrics::average_sentence_length(&tokens.sentences);
        let character_count = essay.chars().count();
        let breakdown = scoring::aggregate(richness, average_sentence_length, character_count);
        let insights = insights::extract_insights(&tokens.words, &tokens.sentences);

        tracing::debug!(
            unique = richness.unique,
            total = richness.total,
            average_sentence_length,
            raw_score = breakdown.raw,
            "essay scored"
        );

        EssayReport {
            score: breakdown.score(),
            unique_word_count: richness.unique,
            total_word_count: richness.total,
            average_sentence_length,
            sentence_count: tokens.sentences.len(),
            character_count,
            keywords: insights.keywords,
            longest_sentence: insights.longest_sentence,
            shortest_sentence: insights.shortest_sentence,
            breakdown,
        }
    }

    /// Score an essay written in the given format.
    pub fn analyze_as(&self, essay: &str, format: EssayFormat) -> EssayReport {
        self.analyze(&format.prose(essay))
    }
}

static DEFAULT_ANALYZER: OnceLock<EssayAnalyzer> = OnceLock::new();

/// Prepare the process-wide analyzer.
///
/// Safe to call any number of times; only the first call builds anything.
pub fn initialize() -> &'static EssayAnalyzer {
    DEFAULT_ANALYZER.get_or_init(|| {
        tracing::debug!("initializing default essay analyzer");
        EssayAnalyzer::new()
    })
}

/// Score an essay with the process-wide analyzer, initializing it on first use.
pub fn analyze(essay: &str) -> EssayReport {
    initialize().analyze(essay)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn two_sentence_scenario() {
        let essay = "The cat sat. The dog ran fast.";
        let report = analyze(essay);

        assert_eq!(report.total_word_count, 7);
        assert_eq!(report.unique_word_count, 6);
        assert_eq!(report.sentence_count, 2);
        assert!(close(report.average_sentence_length, 4.5));
        assert_eq!(report.longest_sentence, "The dog ran fast.");
        assert_eq!(report.shortest_sentence, "The cat sat.");

        let expected = 6.0 / 7.0 * 30.0 + 4.5 * 2.0 + essay.len() as f64 / 100.0;
        assert!(close(report.score, expected));
        assert!(close(report.breakdown.raw, expected));
    }

    #[test]
    fn lowercase_essay_scores_like_capitalized() {
        let lower = analyze("i went home. then i slept. it was late.");
        let upper = analyze("I went home. Then I slept. It was late.");

        assert_eq!(lower.sentence_count, 3);
        assert!(close(lower.average_sentence_length, 4.0));
        assert_eq!(lower.longest_sentence, "i went home.");
        assert_eq!(lower.sentence_count, upper.sentence_count);
        assert!(close(lower.score, upper.score));
    }

    #[test]
    fn single_word_essay() {
        let report = analyze("Hello");
        assert_eq!(report.total_word_count, 1);
        assert_eq!(report.unique_word_count, 1);
        assert_eq!(report.sentence_count, 1);
        assert_eq!(report.longest_sentence, "Hello");
        assert_eq!(report.shortest_sentence, "Hello");
        assert_eq!(report.keywords, vec!["hello"]);
    }

    #[test]
    fn blank_essays_are_zero() {
        for essay in ["", "   ", "\n\t "] {
            let report = analyze(essay);
            assert_eq!(report, EssayReport::default(), "input {essay:?}");
            assert_eq!(report.score, 0.0);
            assert_eq!(report.longest_sentence, "");
        }
    }

    #[test]
    fn repeated_word_keeps_one_unique() {
        let essay = vec!["echo"; 50].join(" ");
        let report = analyze(&essay);
        assert_eq!(report.unique_word_count, 1);
        assert_eq!(report.total_word_count, 50);
        assert!(close(report.breakdown.vocabulary, 30.0 / 50.0));
    }

    #[test]
    fn analysis_is_repeatable() {
        let essay = "Rust is fast. Rust is safe! Is it fun? Yes.";
        assert_eq!(analyze(essay), analyze(essay));
    }

    #[test]
    fn long_essay_is_capped() {
        let sentence = "Every careful writer eventually learns that varied sentences keep readers engaged, ";
        let essay = format!("{}done.", sentence.repeat(40));
        let report = analyze(&essay);
        assert_eq!(report.score, 100.0);
        assert!(report.breakdown.raw > 100.0);
    }

    #[test]
    fn character_count_uses_chars_not_bytes() {
        let report = analyze("Café olé.");
        assert_eq!(report.character_count, 9);
    }

    #[test]
    fn markdown_is_scored_as_prose() {
        let analyzer = EssayAnalyzer::new();
        let md = "# Title\n\nThe cat sat. The dog ran fast.\n\n```\ncode here\n```";
        let report = analyzer.analyze_as(md, EssayFormat::Markdown);
        assert_eq!(report.total_word_count, 7);
        assert_eq!(report.sentence_count, 2);
    }

    #[test]
    fn initialize_is_idempotent() {
        let first = initialize() as *const EssayAnalyzer;
        let second = initialize() as *const EssayAnalyzer;
        assert_eq!(first, second);
    }

    #[test]
    fn top_keywords_truncates() {
        let report = analyze("one two three four");
        assert_eq!(report.top_keywords(2), ["one", "two"]);
        assert_eq!(report.top_keywords(10).len(), 4);
    }

    #[test]
    fn report_serializes_with_snake_case_fields() {
        let report = analyze("The cat sat. The dog ran fast.");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["unique_word_count"], 6);
        assert_eq!(json["keywords"][1], "cat");
        assert!(json["breakdown"]["vocabulary"].is_f64());

        let back: EssayReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn custom_abbreviations_change_sentences() {
        let analyzer = EssayAnalyzer::with_abbreviations(["Sec"]).unwrap();
        let report = analyzer.analyze("See Sec. Four for details.");
        assert_eq!(report.sentence_count, 1);
    }
}
