//! The correction engine: scoring, decisions, and the sentence driver.
//!
//! `SpellCorrector` is a long-lived object shared across request
//! threads. Configuration, the keyboard table, and morphology data are
//! immutable after construction; the lexicon aggregate sits behind a
//! readers-writer lock so custom-word updates stay atomic; the log-prior
//! and distance caches are concurrent and monotonic.
//!
//! Correction never fails: any input produces a result, in the worst
//! case `corrected == original` with no suggestions.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::config::CorrectorConfig;
use crate::correction::agreement::Morphology;
use crate::correction::distance::{WeightedDl, unit_dl};
use crate::correction::lexicon::Lexicon;
use crate::correction::tokenize::{is_word, match_case, tokenize};
use crate::correction::types::{
    Candidate, CorrectionResult, Decision, ScoredSuggestion, SuggestionInfo,
};
use crate::customdict::CustomDictStore;
use crate::defaults::FREQUENCY_FLOOR;
use crate::error::Result;
use crate::morphology::MorphAnalyzer;

/// Score bonus when the candidate is one substitution or transposition
/// away (same length).
const ONE_EDIT_SAME_LEN_BONUS: f64 = 0.8;
/// Bonus when the surface dropped one letter of the candidate.
const ONE_EDIT_INSERT_BONUS: f64 = 0.5;
/// Bonus when the surface has one extra letter; withheld for short words.
const ONE_EDIT_DELETE_BONUS: f64 = 0.3;
/// Penalty applied once the candidate is two or more edits away.
const MULTI_EDIT_PENALTY: f64 = 0.6;
/// Per-character penalty for shortening a short surface token.
const SHORT_SHRINK_PENALTY: f64 = 0.6;
/// Hint-list admission margin over the surface baseline.
const HINT_MIN_GAIN: f64 = 0.2;
/// Score slack within which a one-edit candidate overtakes a
/// multi-edit best.
const ONE_EDIT_RERANK_SLACK: f64 = 1.0;
/// Gain below which a short in-vocabulary word refuses to shrink.
const SHORT_GUARD_GAIN: f64 = 1.0;

/// Outcome of scoring one word position.
struct PositionOutcome {
    chosen: String,
    chosen_score: f64,
    decision: Decision,
    hints: Vec<String>,
    /// Highest-scored candidate other than the chosen one.
    alternative: Option<(String, f64)>,
}

/// Context-aware spelling corrector.
pub struct SpellCorrector {
    config: CorrectorConfig,
    lexicon: RwLock<Lexicon>,
    morphology: Option<Morphology>,
    store: Option<Box<dyn CustomDictStore>>,
    distance: WeightedDl,
    logp_cache: DashMap<String, f64>,
}

impl std::fmt::Debug for SpellCorrector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpellCorrector")
            .field("config", &self.config)
            .field("lexicon_words", &self.lexicon.read().unwrap().len())
            .field("morphology", &self.morphology.is_some())
            .field("store", &self.store.is_some())
            .finish_non_exhaustive()
    }
}

impl SpellCorrector {
    /// Build a corrector from a frequency dictionary file.
    ///
    /// A missing dictionary is fatal. A missing analyser only disables
    /// the morphology feature. A store that fails to list its words at
    /// startup degrades to an empty custom set with a warning.
    pub fn new(
        config: CorrectorConfig,
        dictionary_path: &Path,
        analyzer: Option<Arc<dyn MorphAnalyzer>>,
        store: Option<Box<dyn CustomDictStore>>,
    ) -> Result<Self> {
        let fuzzy_bound = config.use_symspell.then_some(config.max_edit_distance);
        let lexicon = Lexicon::load(dictionary_path, fuzzy_bound)?;
        Ok(Self::from_parts(config, lexicon, analyzer, store))
    }

    /// Build a corrector around an already-populated lexicon.
    pub fn from_parts(
        mut config: CorrectorConfig,
        mut lexicon: Lexicon,
        analyzer: Option<Arc<dyn MorphAnalyzer>>,
        store: Option<Box<dyn CustomDictStore>>,
    ) -> Self {
        let morphology = match analyzer {
            Some(analyzer) if config.use_morphology => Some(Morphology::new(analyzer)),
            _ => {
                if config.use_morphology {
                    warn!("no morphology analyser available, disabling morphology");
                    config.use_morphology = false;
                }
                None
            }
        };

        if let Some(store) = &store {
            match store.all() {
                Ok(words) => {
                    for word in words {
                        lexicon.insert_custom(&word.to_lowercase());
                    }
                }
                Err(e) => warn!(error = %e, "failed to load custom words, starting empty"),
            }
        }

        let distance = WeightedDl::new(
            config.neighbor_ins_del,
            config.transpose_cost,
            config.keyboard_near_sub,
        );

        Self {
            config,
            lexicon: RwLock::new(lexicon),
            morphology,
            store,
            distance,
            logp_cache: DashMap::new(),
        }
    }

    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Whether a lowercased word is in the vocabulary or custom set.
    pub fn knows(&self, word: &str) -> bool {
        self.lexicon.read().unwrap().contains(word)
    }

    /// Add a custom word.
    ///
    /// The word is lowercased, written to the store first (a store
    /// failure leaves memory untouched), then inserted into the
    /// vocabulary, frequency table, custom set, and fuzzy index under
    /// one write lock. Custom words receive a synthetic frequency of
    /// 10⁹, so they dominate the prior of every natural word.
    pub fn add_custom_word(&self, word: &str) -> Result<()> {
        let word = word.to_lowercase();
        if let Some(store) = &self.store {
            store.add(&word)?;
        }
        let mut lexicon = self.lexicon.write().unwrap();
        lexicon.insert_custom(&word);
        // a stale prior would hide the synthetic frequency
        self.logp_cache.remove(&word);
        Ok(())
    }

    /// Remove a custom word from the store and all in-memory structures.
    pub fn remove_custom_word(&self, word: &str) -> Result<()> {
        let word = word.to_lowercase();
        if let Some(store) = &self.store {
            store.remove(&word)?;
        }
        let mut lexicon = self.lexicon.write().unwrap();
        lexicon.remove_custom(&word);
        self.logp_cache.remove(&word);
        Ok(())
    }

    /// Smoothed, temperature-adjusted log-prior of a lowercased word.
    fn log_prior(&self, lexicon: &Lexicon, word: &str) -> f64 {
        if let Some(cached) = self.logp_cache.get(word) {
            return *cached;
        }
        let freq = lexicon.frequency(word).unwrap_or(0.0).max(FREQUENCY_FLOOR);
        let prior = freq.powf(1.0 / self.config.freq_temperature).ln();
        self.logp_cache.insert(word.to_string(), prior);
        prior
    }

    fn agreement_bonus(&self, lexicon: &Lexicon, term: &str, ctx: &[String], idx: usize) -> f64 {
        if !self.config.enable_context || !self.config.use_morphology {
            return 0.0;
        }
        let Some(morphology) = &self.morphology else {
            return 0.0;
        };
        // custom words have no reliable parses and are never rescored
        if !lexicon.in_base_vocab(term) || lexicon.is_custom(term) {
            return 0.0;
        }
        morphology.agreement_bonus(term, ctx, idx)
    }

    /// Score the candidates of one word position and decide its fate.
    fn resolve_position(
        &self,
        lexicon: &Lexicon,
        xl: &str,
        ctx: &[String],
        idx: usize,
        trace: bool,
    ) -> Option<PositionOutcome> {
        let beta = self.config.beta_weight;
        let lambda = self.config.lambda_penalty;
        let gamma = self.config.gamma_morph;

        let in_vocab = lexicon.contains(xl);
        let base_score = beta * self.log_prior(lexicon, xl);
        let lx = xl.chars().count();

        let mut scored: Vec<Candidate> = Vec::new();
        let mut has_original = false;

        for term in lexicon.candidates(xl, self.config.max_edit_distance) {
            // the surface itself is always eligible, everything else
            // must be a known word
            if term != xl && !lexicon.contains(&term) {
                continue;
            }
            let morph = self.agreement_bonus(lexicon, &term, ctx, idx);

            if term == xl {
                let score = beta * self.log_prior(lexicon, &term) + gamma * morph;
                if trace {
                    debug!(term = %term, score, morph, "original scored");
                }
                has_original = true;
                scored.push(Candidate {
                    term,
                    cost: 0.0,
                    score,
                    edits: 0,
                });
                continue;
            }

            let cost = self.distance.between(xl, &term);
            let edits = unit_dl(xl, &term);
            let ly = term.chars().count();

            let mut score = beta * self.log_prior(lexicon, &term) - lambda * cost + gamma * morph;

            // single edits are the common typo; reward them by type,
            // substitution/transposition over insertion over deletion
            if edits == 1 {
                if ly == lx {
                    score += ONE_EDIT_SAME_LEN_BONUS;
                } else if ly == lx + 1 {
                    score += ONE_EDIT_INSERT_BONUS;
                } else if ly + 1 == lx && lx > 3 {
                    score += ONE_EDIT_DELETE_BONUS;
                }
            } else if edits >= 2 {
                score -= MULTI_EDIT_PENALTY;
            }

            // never reward collapsing an already short token
            if lx <= 3 && ly < lx {
                score -= SHORT_SHRINK_PENALTY * (lx - ly) as f64;
            }

            if trace {
                debug!(term = %term, score, cost, morph, edits, "candidate scored");
            }
            scored.push(Candidate {
                term,
                cost,
                score,
                edits,
            });
        }

        if scored.is_empty() {
            return None;
        }

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.cost.total_cmp(&b.cost))
        });

        let second_best_score = scored.get(1).map_or(f64::NEG_INFINITY, |c| c.score);
        let mut best = 0;

        // prefer a one-edit candidate when the top pick needs several
        // edits and the gap is small
        if scored[best].edits > 1 {
            for k in 1..scored.len().min(3) {
                if scored[k].edits == 1 && scored[0].score - scored[k].score <= ONE_EDIT_RERANK_SLACK
                {
                    best = k;
                    break;
                }
            }
        }

        // a known short word keeps its length unless the gain is large
        if in_vocab
            && lx <= 3
            && scored[best].term.chars().count() < lx
            && scored[best].score - base_score < SHORT_GUARD_GAIN
            && let Some(original) = scored.iter().position(|c| c.term == xl)
        {
            best = original;
        }

        let margin = if has_original {
            scored[best].score - second_best_score
        } else {
            scored[best].score - base_score
        };
        let gain = scored[best].score - base_score;
        let tau = if in_vocab {
            self.config.tau_in_vocab
        } else {
            self.config.tau_out_vocab
        };

        let (decision, chosen) = if margin >= self.config.margin_threshold && gain >= tau {
            (Decision::AutoReplace, scored[best].term.clone())
        } else {
            (Decision::HintOnly, xl.to_string())
        };
        if trace {
            debug!(surface = %xl, margin, gain, tau, ?decision, chosen = %chosen, "decision");
        }

        let hints: Vec<String> = scored
            .iter()
            .filter(|c| c.term != xl && c.score >= base_score + HINT_MIN_GAIN)
            .take(self.config.top_k_suggestions)
            .map(|c| c.term.clone())
            .collect();

        let chosen_score = scored
            .iter()
            .find(|c| c.term == chosen)
            .map_or(base_score, |c| c.score);

        let alternative = (chosen != xl)
            .then(|| {
                scored
                    .iter()
                    .find(|c| c.term != chosen)
                    .map(|c| (c.term.clone(), c.score))
            })
            .flatten();

        Some(PositionOutcome {
            chosen,
            chosen_score,
            decision,
            hints,
            alternative,
        })
    }

    /// Correct a text.
    ///
    /// Tokenises losslessly, scores each word token against its
    /// candidates, replaces tokens that clear the margin and gain
    /// thresholds (mirroring the surface casing), and ranks whole-text
    /// alternatives built from runner-up candidates. With `trace` set,
    /// per-candidate score components are emitted at debug level.
    pub fn correct_text(&self, text: &str, trace: bool) -> CorrectionResult {
        let tokens = tokenize(text);
        let mut out = tokens.clone();
        let mut detailed: HashMap<usize, SuggestionInfo> = HashMap::new();
        let mut total_score = 0.0;

        struct AltChoice {
            idx: usize,
            term: String,
            score: f64,
            chosen_score: f64,
        }
        let mut alt_choices: Vec<AltChoice> = Vec::new();

        let ctx: Vec<String> = tokens
            .iter()
            .map(|t| if is_word(t) { t.to_lowercase() } else { t.clone() })
            .collect();

        for (idx, surface) in tokens.iter().enumerate() {
            if !is_word(surface) {
                continue;
            }
            let xl = surface.to_lowercase();
            if self.config.filter_short_words && xl.chars().count() <= 2 {
                continue;
            }

            // each token sees one consistent lexicon snapshot
            let lexicon = self.lexicon.read().unwrap();
            let Some(outcome) = self.resolve_position(&lexicon, &xl, &ctx, idx, trace) else {
                continue;
            };
            drop(lexicon);

            if !outcome.hints.is_empty() {
                detailed.insert(
                    idx,
                    SuggestionInfo {
                        token: surface.clone(),
                        suggestions: outcome.hints,
                        decision: outcome.decision,
                    },
                );
            }

            total_score += outcome.chosen_score;

            if outcome.chosen != xl {
                if let Some((term, score)) = outcome.alternative {
                    alt_choices.push(AltChoice {
                        idx,
                        term,
                        score,
                        chosen_score: outcome.chosen_score,
                    });
                }
                out[idx] = match_case(surface, &outcome.chosen);
            }
        }

        let mut alternatives: Vec<ScoredSuggestion> = alt_choices
            .into_iter()
            .map(|choice| {
                let mut alt_out = out.clone();
                alt_out[choice.idx] = match_case(&tokens[choice.idx], &choice.term);
                ScoredSuggestion {
                    text: alt_out.concat(),
                    score: total_score - choice.chosen_score + choice.score,
                }
            })
            .collect();
        alternatives.sort_by(|a, b| b.score.total_cmp(&a.score));

        CorrectionResult {
            original: text.to_string(),
            corrected: out.concat(),
            suggestions: alternatives,
            detailed_suggestions: detailed,
        }
    }
}
