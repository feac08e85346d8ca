//! Scoring and decision core for spelling correction.
//!
//! The pipeline per word token: generate candidates from the lexicon,
//! price each by frequency prior, weighted edit cost, and morphological
//! agreement, then decide between replacing the token and merely hinting.
//! The sentence driver walks word positions, preserves casing and
//! non-letter tokens, and assembles ranked whole-text alternatives.

pub mod agreement;
pub mod distance;
pub mod engine;
pub mod lexicon;
pub mod tokenize;
pub mod types;

pub use engine::SpellCorrector;
pub use types::{Candidate, CorrectionResult, Decision, ScoredSuggestion, SuggestionInfo};
