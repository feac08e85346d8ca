//! Morphological analysis capability consumed by the correction engine.
//!
//! The engine only needs `analyze(word) → parses`; the linguistic data
//! behind that call is pluggable. [`TableMorphAnalyzer`] is a bundled
//! table-backed implementation good enough for curated vocabularies and
//! tests; production hosts can wrap a full analyser behind the same
//! trait.
//!
//! Grammatical values are the analyser's native Russian labels. An empty
//! string in any field means "unspecified" and matches anything during
//! agreement checks.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{PravkaError, Result};

/// Grammatical category labels used in [`Parse`] fields.
pub mod grammar {
    pub const VERB: &str = "Глагол";
    pub const NOUN: &str = "Существительное";
    pub const ADJECTIVE: &str = "Прилагательное";
    pub const PRONOUN: &str = "Местоимение";
    pub const PARTICIPLE: &str = "Причастие";
    pub const PREPOSITION: &str = "Предлог";

    pub const MASCULINE: &str = "Мужской";
    pub const FEMININE: &str = "Женский";
    pub const NEUTER: &str = "Средний";

    pub const SINGULAR: &str = "Единственное число";
    pub const PLURAL: &str = "Множественное число";

    pub const NOMINATIVE: &str = "Именительный";
    pub const GENITIVE: &str = "Родительный";
    pub const DATIVE: &str = "Дательный";
    pub const ACCUSATIVE: &str = "Винительный";
    pub const INSTRUMENTAL: &str = "Творительный";
    pub const PREPOSITIONAL: &str = "Предложный";
}

/// One morphological reading of a word.
///
/// Fields are plain strings as produced by the analyser; empty means
/// unspecified and acts as a wildcard in agreement checks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parse {
    pub part_of_speech: String,
    pub gender: String,
    pub number: String,
    pub case: String,
    pub lemma: String,
}

impl Parse {
    /// Build a parse from field values; empty strings stay wildcards.
    pub fn new(part_of_speech: &str, gender: &str, number: &str, case: &str, lemma: &str) -> Self {
        Self {
            part_of_speech: part_of_speech.to_string(),
            gender: gender.to_string(),
            number: number.to_string(),
            case: case.to_string(),
            lemma: lemma.to_string(),
        }
    }
}

/// Morphological analysis capability.
///
/// Implementations return every known reading of a lowercased word, or an
/// empty list for unknown words. Calls must be cheap enough for the hot
/// path or internally cached; the engine additionally memoises results
/// per word.
pub trait MorphAnalyzer: Send + Sync {
    /// Analyze a word and return all of its parses.
    fn analyze(&self, word: &str) -> Vec<Parse>;

    /// Return the name of this analyser for logging.
    fn name(&self) -> &str {
        "morph"
    }
}

/// Table-backed analyser over a `word<TAB>parse` record file.
///
/// Each line holds one parse:
///
/// ```text
/// пришла	Глагол,Женский,Единственное число,,прийти
/// ```
///
/// The second field is comma-separated `pos,gender,number,case,lemma`;
/// trailing fields may be omitted. Repeated words accumulate parses.
pub struct TableMorphAnalyzer {
    parses: HashMap<String, Vec<Parse>>,
}

impl std::fmt::Debug for TableMorphAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableMorphAnalyzer")
            .field("words", &self.parses.len())
            .finish()
    }
}

impl TableMorphAnalyzer {
    /// Load analysis records from a file.
    ///
    /// Lines without a TAB separator are skipped; a line whose record has
    /// no part of speech is malformed and rejected.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PravkaError::MorphologyLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut parses: HashMap<String, Vec<Parse>> = HashMap::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((word, record)) = line.split_once('\t') else {
                continue;
            };
            let parse = parse_record(record);
            if parse.part_of_speech.is_empty() {
                return Err(PravkaError::MorphologyLoad {
                    path: path.display().to_string(),
                    message: format!("line {}: record has no part of speech", lineno + 1),
                });
            }
            parses
                .entry(word.trim().to_lowercase())
                .or_default()
                .push(parse);
        }
        Ok(Self { parses })
    }

    /// Build an analyser from in-memory entries.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Parse)>,
    {
        let mut parses: HashMap<String, Vec<Parse>> = HashMap::new();
        for (word, parse) in entries {
            parses.entry(word.to_lowercase()).or_default().push(parse);
        }
        Self { parses }
    }

    /// Number of distinct words with at least one parse.
    pub fn len(&self) -> usize {
        self.parses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parses.is_empty()
    }
}

fn parse_record(record: &str) -> Parse {
    let mut fields = record.split(',').map(str::trim);
    Parse {
        part_of_speech: fields.next().unwrap_or_default().to_string(),
        gender: fields.next().unwrap_or_default().to_string(),
        number: fields.next().unwrap_or_default().to_string(),
        case: fields.next().unwrap_or_default().to_string(),
        lemma: fields.next().unwrap_or_default().to_string(),
    }
}

impl MorphAnalyzer for TableMorphAnalyzer {
    fn analyze(&self, word: &str) -> Vec<Parse> {
        self.parses.get(word).cloned().unwrap_or_default()
    }

    fn name(&self) -> &str {
        "table"
    }
}
