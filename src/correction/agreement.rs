//! Morphological agreement bonus over neighbouring tokens.
//!
//! A small rule-based grammar: each rule inspects the parses of the
//! candidate and of a few surrounding tokens and adds a fixed bonus when
//! an agreement pattern holds. Rules fire independently and accumulate;
//! the result is always non-negative. Analyses are memoised per word for
//! the lifetime of the engine.
//!
//! The token slice is the driver's lowercased context: word tokens are
//! lowercased, whitespace and punctuation tokens appear verbatim, so
//! windows are expressed in token positions, not word positions.

use std::sync::Arc;

use dashmap::DashMap;

use crate::correction::tokenize::is_word;
use crate::morphology::{MorphAnalyzer, Parse, grammar};

/// Bonus for a left-side pronoun agreeing with a candidate verb.
const PRONOUN_VERB_LEFT: f64 = 1.1;
/// Bonus for a candidate pronoun agreeing with a verb to its right.
const PRONOUN_VERB_RIGHT: f64 = 1.5;
/// Bonus per side for adjective/noun adjacency agreement.
const ADJ_NOUN_ADJACENT: f64 = 0.9;
/// Bonus for a noun/pronoun candidate in a case governed by a preposition.
const PREPOSITION_CASE: f64 = 0.6;
/// Bonus for adjective/participle agreement across a copula.
const COPULA_AGREEMENT: f64 = 2.0;
/// Bonus for a candidate verb with a personal pronoun to its right.
const VERB_PRONOUN_RIGHT: f64 = 0.8;

/// Personal pronouns with their gender/number; empty gender is a wildcard.
static PRONOUNS: [(&str, &str, &str); 8] = [
    ("она", grammar::FEMININE, grammar::SINGULAR),
    ("он", grammar::MASCULINE, grammar::SINGULAR),
    ("оно", grammar::NEUTER, grammar::SINGULAR),
    ("они", "", grammar::PLURAL),
    ("мы", "", grammar::PLURAL),
    ("вы", "", grammar::PLURAL),
    ("я", "", grammar::SINGULAR),
    ("ты", "", grammar::SINGULAR),
];

/// Case government of the frequent prepositions.
static PREPOSITION_CASES: [(&str, &[&str]); 16] = [
    ("к", &[grammar::DATIVE]),
    ("по", &[grammar::DATIVE]),
    ("о", &[grammar::PREPOSITIONAL]),
    ("об", &[grammar::PREPOSITIONAL]),
    ("обо", &[grammar::PREPOSITIONAL]),
    ("у", &[grammar::GENITIVE]),
    ("от", &[grammar::GENITIVE]),
    ("до", &[grammar::GENITIVE]),
    ("без", &[grammar::GENITIVE]),
    ("из", &[grammar::GENITIVE]),
    ("за", &[grammar::ACCUSATIVE, grammar::INSTRUMENTAL]),
    ("под", &[grammar::ACCUSATIVE, grammar::INSTRUMENTAL]),
    ("над", &[grammar::INSTRUMENTAL]),
    ("перед", &[grammar::INSTRUMENTAL]),
    ("в", &[grammar::ACCUSATIVE, grammar::PREPOSITIONAL]),
    ("на", &[grammar::ACCUSATIVE, grammar::PREPOSITIONAL]),
];

fn pronoun_gender_number(token: &str) -> Option<(&'static str, &'static str)> {
    PRONOUNS
        .iter()
        .find(|(p, _, _)| *p == token)
        .map(|&(_, g, n)| (g, n))
}

fn governed_cases(token: &str) -> Option<&'static [&'static str]> {
    PREPOSITION_CASES
        .iter()
        .find(|(p, _)| *p == token)
        .map(|&(_, cases)| cases)
}

/// Fields agree when either side is unspecified or both are equal.
fn agrees(a: &str, b: &str) -> bool {
    a.is_empty() || b.is_empty() || a == b
}

fn adj_noun_agree(adj: &Parse, noun: &Parse) -> bool {
    agrees(&adj.gender, &noun.gender)
        && agrees(&adj.number, &noun.number)
        && agrees(&adj.case, &noun.case)
}

/// Analyser with a concurrent monotonic parse cache.
pub struct Morphology {
    analyzer: Arc<dyn MorphAnalyzer>,
    cache: DashMap<String, Arc<Vec<Parse>>>,
}

impl std::fmt::Debug for Morphology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Morphology")
            .field("analyzer", &self.analyzer.name())
            .field("cached_words", &self.cache.len())
            .finish()
    }
}

impl Morphology {
    pub fn new(analyzer: Arc<dyn MorphAnalyzer>) -> Self {
        Self {
            analyzer,
            cache: DashMap::new(),
        }
    }

    /// All parses of `word`, memoised under the lowercased key.
    pub fn parses(&self, word: &str) -> Arc<Vec<Parse>> {
        let key = word.to_lowercase();
        if let Some(cached) = self.cache.get(&key) {
            return Arc::clone(&cached);
        }
        let parses = Arc::new(self.analyzer.analyze(&key));
        self.cache.insert(key, Arc::clone(&parses));
        parses
    }

    /// Additive agreement bonus for `candidate` at token position `idx`.
    pub fn agreement_bonus(&self, candidate: &str, tokens: &[String], idx: usize) -> f64 {
        let parses = self.parses(candidate);
        if parses.is_empty() {
            return 0.0;
        }

        let mut bonus = 0.0;
        bonus += self.pronoun_verb_left(&parses, tokens, idx);
        bonus += self.pronoun_with_verb_right(&parses, tokens, idx);
        bonus += self.adjective_noun_adjacency(&parses, tokens, idx);
        bonus += self.preposition_case(&parses, tokens, idx);
        bonus += self.copula_agreement(&parses, tokens, idx);
        bonus += self.verb_with_pronoun_right(&parses, tokens, idx);
        bonus
    }

    /// Rule 1: a personal pronoun within two tokens to the left agrees
    /// with a verb reading of the candidate. The nearest pronoun wins.
    fn pronoun_verb_left(&self, parses: &[Parse], tokens: &[String], idx: usize) -> f64 {
        let start = idx.saturating_sub(2);
        for i in (start..idx).rev() {
            let Some((gender, number)) = pronoun_gender_number(&tokens[i]) else {
                continue;
            };
            let matched = parses.iter().any(|p| {
                p.part_of_speech == grammar::VERB
                    && agrees(gender, &p.gender)
                    && agrees(number, &p.number)
            });
            return if matched { PRONOUN_VERB_LEFT } else { 0.0 };
        }
        0.0
    }

    /// Rule 2: the candidate reads as a pronoun and the first word token
    /// within two tokens to the right has a verb parse agreeing by
    /// number (and by gender when both sides specify it).
    fn pronoun_with_verb_right(&self, parses: &[Parse], tokens: &[String], idx: usize) -> f64 {
        let pronoun_parses: Vec<&Parse> = parses
            .iter()
            .filter(|p| p.part_of_speech == grammar::PRONOUN)
            .collect();
        if pronoun_parses.is_empty() {
            return 0.0;
        }
        let end = tokens.len().min(idx + 3);
        for token in &tokens[idx + 1..end] {
            if !is_word(token) {
                continue;
            }
            let verb_parses = self.parses(token);
            let matched = verb_parses
                .iter()
                .filter(|v| v.part_of_speech == grammar::VERB)
                .any(|v| {
                    pronoun_parses.iter().any(|pr| {
                        let number_ok =
                            pr.number.is_empty() || v.number.is_empty() || pr.number == v.number;
                        let gender_ok =
                            pr.gender.is_empty() || v.gender.is_empty() || pr.gender == v.gender;
                        number_ok && gender_ok
                    })
                });
            return if matched { PRONOUN_VERB_RIGHT } else { 0.0 };
        }
        0.0
    }

    /// Rule 3: an immediately adjacent token forms an agreeing
    /// adjective–noun pair with the candidate, once per side.
    fn adjective_noun_adjacency(&self, parses: &[Parse], tokens: &[String], idx: usize) -> f64 {
        let mut bonus = 0.0;
        let neighbours = [idx.checked_sub(1), Some(idx + 1)];
        for neighbour in neighbours.into_iter().flatten() {
            let Some(token) = tokens.get(neighbour) else {
                continue;
            };
            if !is_word(token) {
                continue;
            }
            let neighbour_parses = self.parses(token);
            let matched = neighbour_parses.iter().any(|np| {
                parses.iter().any(|cp| {
                    (np.part_of_speech == grammar::ADJECTIVE
                        && cp.part_of_speech == grammar::NOUN
                        && adj_noun_agree(np, cp))
                        || (np.part_of_speech == grammar::NOUN
                            && cp.part_of_speech == grammar::ADJECTIVE
                            && adj_noun_agree(cp, np))
                })
            });
            if matched {
                bonus += ADJ_NOUN_ADJACENT;
            }
        }
        bonus
    }

    /// Rule 4: a preposition within two tokens to the left governs a case
    /// carried by a noun or pronoun reading of the candidate. The first
    /// preposition found is applied.
    fn preposition_case(&self, parses: &[Parse], tokens: &[String], idx: usize) -> f64 {
        let start = idx.saturating_sub(2);
        for token in &tokens[start..idx] {
            let Some(allowed) = governed_cases(token) else {
                continue;
            };
            let matched = parses.iter().any(|p| {
                (p.part_of_speech == grammar::NOUN || p.part_of_speech == grammar::PRONOUN)
                    && allowed.contains(&p.case.as_str())
            });
            return if matched { PREPOSITION_CASE } else { 0.0 };
        }
        0.0
    }

    /// Rule 5: a copula to the left links the candidate back to a noun;
    /// an adjective or participle reading agreeing with that noun in
    /// gender and number (noun case unspecified or nominative) earns the
    /// strong bonus. The first copula stops the scan.
    fn copula_agreement(&self, parses: &[Parse], tokens: &[String], idx: usize) -> f64 {
        let copula_start = idx.saturating_sub(6);
        for j in (copula_start..idx).rev() {
            if !is_word(&tokens[j]) {
                continue;
            }
            if !self.is_copula(&tokens[j]) {
                continue;
            }
            let noun_start = j.saturating_sub(4);
            for k in (noun_start..j).rev() {
                if !is_word(&tokens[k]) {
                    continue;
                }
                let noun_parses = self.parses(&tokens[k]);
                let nouns: Vec<&Parse> = noun_parses
                    .iter()
                    .filter(|p| p.part_of_speech == grammar::NOUN)
                    .collect();
                if nouns.is_empty() {
                    continue;
                }
                let matched = nouns.iter().any(|n| {
                    parses.iter().any(|c| {
                        (c.part_of_speech == grammar::ADJECTIVE
                            || c.part_of_speech == grammar::PARTICIPLE)
                            && agrees(&n.gender, &c.gender)
                            && agrees(&n.number, &c.number)
                            && (n.case.is_empty() || n.case == grammar::NOMINATIVE)
                    })
                });
                return if matched { COPULA_AGREEMENT } else { 0.0 };
            }
            return 0.0;
        }
        0.0
    }

    /// Rule 6: a personal pronoun within two tokens to the right of a
    /// candidate verb.
    fn verb_with_pronoun_right(&self, parses: &[Parse], tokens: &[String], idx: usize) -> f64 {
        let end = tokens.len().min(idx + 3);
        for token in &tokens[idx + 1..end] {
            if pronoun_gender_number(token).is_none() {
                continue;
            }
            let is_verb = parses.iter().any(|p| p.part_of_speech == grammar::VERB);
            return if is_verb { VERB_PRONOUN_RIGHT } else { 0.0 };
        }
        0.0
    }

    fn is_copula(&self, word: &str) -> bool {
        self.parses(word).iter().any(|p| {
            p.part_of_speech == grammar::VERB && (p.lemma == "быть" || p.lemma == "являться")
        })
    }
}
