//! Dictionaries for text analysis.
//!
//! Provides the curated word sets used by sentence splitting.

pub mod abbreviations;
