//! Core library for essay-scorer.
//!
//! Scores free-text essays from lexical statistics: vocabulary richness,
//! average sentence length, and raw length. The result also carries a few
//! insights (distinct words, longest and shortest sentence).
//!
//! # Modules
//!
//! - [`text`] - Word and sentence tokenization
//! - [`metrics`] - Vocabulary richness and sentence length
//! - [`insights`] - Keywords and extreme sentences
//! - [`scoring`] - Score aggregation and clamping
//! - [`analyzer`] - The end-to-end pipeline
//! - [`markdown`] - Essay formats and markdown-to-prose reduction
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! let report = essay_scorer_core::analyze("The cat sat. The dog ran fast.");
//!
//! assert_eq!(report.total_word_count, 7);
//! assert_eq!(report.unique_word_count, 6);
//! assert!(report.score > 0.0 && report.score <= 100.0);
//! ```
#![deny(unsafe_code)]

pub mod analyzer;
pub mod config;
pub mod dictionaries;
pub mod error;
pub mod insights;
pub mod markdown;
pub mod metrics;
pub mod scoring;
pub mod text;

pub use analyzer::{EssayAnalyzer, EssayReport, analyze, initialize};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{AnalysisError, AnalysisResult, ConfigError, ConfigResult};
pub use markdown::EssayFormat;
pub use scoring::ScoreBreakdown;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
