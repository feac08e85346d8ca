//! Result types produced by the correction engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A scored replacement candidate for one surface token.
///
/// Ephemeral: built during scoring, dropped once the decision is made.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The candidate term, lowercased.
    pub term: String,
    /// Weighted Damerau–Levenshtein cost from the surface to this term.
    pub cost: f64,
    /// Combined score: prior, edit cost, morphology, and heuristics.
    pub score: f64,
    /// Unit edit count from the surface to this term.
    pub edits: usize,
}

/// What the engine decided to do with a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The best candidate replaced the surface token.
    AutoReplace,
    /// Suggestions are exposed but the surface token was kept.
    HintOnly,
}

/// Suggestion metadata for one corrected position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionInfo {
    /// The surface token as it appeared in the input.
    pub token: String,
    /// Alternative terms, best first.
    pub suggestions: Vec<String>,
    /// The decision taken at this position.
    pub decision: Decision,
}

/// A whole-text alternative with its sentence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSuggestion {
    pub text: String,
    pub score: f64,
}

/// Full outcome of correcting one input string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CorrectionResult {
    /// The input, verbatim.
    pub original: String,
    /// The corrected text; equals `original` when nothing fired.
    pub corrected: String,
    /// Ranked whole-text alternatives, best first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<ScoredSuggestion>,
    /// Per-token-position suggestion details.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub detailed_suggestions: HashMap<usize, SuggestionInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_serialises_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&Decision::AutoReplace).unwrap(),
            "\"auto_replace\""
        );
        assert_eq!(
            serde_json::to_string(&Decision::HintOnly).unwrap(),
            "\"hint_only\""
        );
    }

    #[test]
    fn empty_result_skips_optional_fields() {
        let result = CorrectionResult {
            original: "текст".into(),
            corrected: "текст".into(),
            ..Default::default()
        };
        let rendered = serde_json::to_string(&result).unwrap();
        assert!(!rendered.contains("suggestions"));
    }

    #[test]
    fn result_round_trips_through_json() {
        let mut detailed = HashMap::new();
        detailed.insert(
            0,
            SuggestionInfo {
                token: "Превет".into(),
                suggestions: vec!["привет".into()],
                decision: Decision::AutoReplace,
            },
        );
        let result = CorrectionResult {
            original: "Превет".into(),
            corrected: "Привет".into(),
            suggestions: vec![ScoredSuggestion {
                text: "Привет".into(),
                score: 6.5,
            }],
            detailed_suggestions: detailed,
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: CorrectionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
