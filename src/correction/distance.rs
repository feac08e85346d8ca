//! Unit and weighted Damerau–Levenshtein distances.
//!
//! The unit variant counts edits and is used only for the edit-count
//! heuristics. The weighted variant is the scoring hot path: insertions
//! and deletions carry a flat cost, substitutions are priced by keyboard
//! proximity, and adjacent transpositions get their own discounted cost.
//! Weighted results are memoised per string pair for the lifetime of the
//! engine; values are pure functions of their keys, so racing writers are
//! benign.

use dashmap::DashMap;

use crate::keyboard::{is_one_adjacent_swap, substitution_cost};

/// Unit-cost Damerau–Levenshtein distance (optimal string alignment).
///
/// Insert, delete, substitute, and adjacent transposition each count as
/// one edit. Three-row DP so the transposition term can reach back two
/// rows.
pub fn unit_dl(a: &str, b: &str) -> usize {
    let ra: Vec<char> = a.chars().collect();
    let rb: Vec<char> = b.chars().collect();
    let (la, lb) = (ra.len(), rb.len());
    if la == 0 {
        return lb;
    }
    if lb == 0 {
        return la;
    }

    let mut prev2 = vec![0usize; lb + 1];
    let mut prev: Vec<usize> = (0..=lb).collect();
    let mut curr = vec![0usize; lb + 1];

    for i in 1..=la {
        curr[0] = i;
        for j in 1..=lb {
            let cost = usize::from(ra[i - 1] != rb[j - 1]);
            let mut best = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
            if i > 1 && j > 1 && ra[i - 1] == rb[j - 2] && ra[i - 2] == rb[j - 1] {
                best = best.min(prev2[j - 2] + 1);
            }
            curr[j] = best;
        }
        std::mem::swap(&mut prev2, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[lb]
}

/// Weighted Damerau–Levenshtein with keyboard-aware substitution costs.
pub struct WeightedDl {
    ins_del: f64,
    transpose: f64,
    near_sub: f64,
    cache: DashMap<(String, String), f64>,
}

impl std::fmt::Debug for WeightedDl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedDl")
            .field("ins_del", &self.ins_del)
            .field("transpose", &self.transpose)
            .field("near_sub", &self.near_sub)
            .field("cached_pairs", &self.cache.len())
            .finish()
    }
}

impl WeightedDl {
    pub fn new(ins_del: f64, transpose: f64, near_sub: f64) -> Self {
        Self {
            ins_del,
            transpose,
            near_sub,
            cache: DashMap::new(),
        }
    }

    /// Weighted distance between two lowercased strings, memoised.
    pub fn between(&self, a: &str, b: &str) -> f64 {
        let key = (a.to_string(), b.to_string());
        if let Some(cached) = self.cache.get(&key) {
            return *cached;
        }
        // common transposition typo skips the DP entirely
        let result = if is_one_adjacent_swap(a, b) {
            self.transpose
        } else {
            self.dp(a, b)
        };
        self.cache.insert(key, result);
        result
    }

    fn dp(&self, a: &str, b: &str) -> f64 {
        let ra: Vec<char> = a.chars().collect();
        let rb: Vec<char> = b.chars().collect();
        let (la, lb) = (ra.len(), rb.len());
        if la == 0 {
            return lb as f64 * self.ins_del;
        }
        if lb == 0 {
            return la as f64 * self.ins_del;
        }

        let mut prev2 = vec![0.0f64; lb + 1];
        let mut prev: Vec<f64> = (0..=lb).map(|j| j as f64 * self.ins_del).collect();
        let mut curr = vec![0.0f64; lb + 1];

        for i in 1..=la {
            curr[0] = i as f64 * self.ins_del;
            for j in 1..=lb {
                let sub = if ra[i - 1] == rb[j - 1] {
                    0.0
                } else {
                    substitution_cost(ra[i - 1], rb[j - 1], self.near_sub)
                };
                let mut best = (prev[j] + self.ins_del)
                    .min(curr[j - 1] + self.ins_del)
                    .min(prev[j - 1] + sub);
                if i > 1 && j > 1 && ra[i - 1] == rb[j - 2] && ra[i - 2] == rb[j - 1] {
                    best = best.min(prev2[j - 2] + self.transpose);
                }
                curr[j] = best;
            }
            std::mem::swap(&mut prev2, &mut prev);
            std::mem::swap(&mut prev, &mut curr);
        }
        prev[lb]
    }
}
