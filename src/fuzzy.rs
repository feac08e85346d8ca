//! Fuzzy term lookup over a SymSpell index.
//!
//! Thin wrapper around the `symspell` crate that exposes the two
//! operations the engine needs: enumerate every indexed term within a
//! bounded edit distance of a token, and append a term at runtime.
//! The index is populated from the same pass over the frequency file
//! that fills the in-memory frequency table, so the two never drift.

use symspell::{SymSpell, SymSpellBuilder, UnicodeStringStrategy, Verbosity};

/// SymSpell-backed fuzzy index over the correction vocabulary.
pub struct FuzzyIndex {
    symspell: SymSpell<UnicodeStringStrategy>,
    max_distance: i64,
}

impl std::fmt::Debug for FuzzyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyIndex")
            .field("max_distance", &self.max_distance)
            .finish_non_exhaustive()
    }
}

impl FuzzyIndex {
    /// Create an empty index accepting lookups up to `max_edit_distance`.
    pub fn new(max_edit_distance: usize) -> Self {
        let max_distance = max_edit_distance as i64;
        let symspell: SymSpell<UnicodeStringStrategy> = SymSpellBuilder::default()
            .max_dictionary_edit_distance(max_distance)
            .prefix_length(7)
            .count_threshold(1)
            .build()
            .expect("SymSpell builder accepts all field combinations");
        Self {
            symspell,
            max_distance,
        }
    }

    /// Insert a term with its frequency count.
    pub fn create_dictionary_entry(&mut self, term: &str, count: u64) {
        self.symspell
            .load_dictionary_line(&format!("{} {}", term, count), 0, 1, " ");
    }

    /// All indexed terms within `max_distance` edits of `term`.
    ///
    /// The distance is clamped to the bound the index was built with.
    /// Never fails: an unknown or empty term simply yields no matches.
    pub fn lookup_all(&self, term: &str, max_distance: usize) -> Vec<String> {
        let distance = (max_distance as i64).min(self.max_distance);
        self.symspell
            .lookup(term, Verbosity::All, distance)
            .into_iter()
            .map(|s| s.term)
            .collect()
    }
}
