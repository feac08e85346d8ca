//! Lexicon state: frequency table, vocabulary, custom words, fuzzy index.
//!
//! The four structures behave as one logical aggregate. Every word in
//! `frequencies` is in `vocab`, every custom word is in both, and the
//! fuzzy index is fed from the same inserts, so readers can never see a
//! word in one structure but missing from another. The engine wraps the
//! whole aggregate in a readers-writer lock.

use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::defaults::CUSTOM_WORD_FREQUENCY;
use crate::error::{PravkaError, Result};
use crate::fuzzy::FuzzyIndex;

#[derive(Debug)]
pub struct Lexicon {
    frequencies: HashMap<String, f64>,
    vocab: HashSet<String>,
    custom: HashSet<String>,
    fuzzy: Option<FuzzyIndex>,
}

impl Lexicon {
    /// Load the frequency dictionary at `path`.
    ///
    /// Each non-empty line is split on whitespace: first field the word
    /// (lowercased on ingest), second field a count parsed as an integer
    /// with a real-number fallback truncated toward zero. Malformed lines
    /// are skipped silently. When `max_edit_distance` is `Some`, a fuzzy
    /// index is built from the same pass.
    pub fn load(path: &Path, max_edit_distance: Option<usize>) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PravkaError::DictionaryNotFound {
                    path: path.display().to_string(),
                }
            } else {
                PravkaError::DictionaryRead {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let mut lexicon = Self {
            frequencies: HashMap::new(),
            vocab: HashSet::new(),
            custom: HashSet::new(),
            fuzzy: max_edit_distance.map(FuzzyIndex::new),
        };

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| PravkaError::DictionaryRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            let mut fields = line.split_whitespace();
            let (Some(word), Some(raw_count)) = (fields.next(), fields.next()) else {
                continue;
            };
            let Some(count) = parse_count(raw_count) else {
                continue;
            };
            lexicon.insert(&word.to_lowercase(), count);
        }
        Ok(lexicon)
    }

    /// Empty lexicon, for tests and hosts that feed entries directly.
    pub fn empty(max_edit_distance: Option<usize>) -> Self {
        Self {
            frequencies: HashMap::new(),
            vocab: HashSet::new(),
            custom: HashSet::new(),
            fuzzy: max_edit_distance.map(FuzzyIndex::new),
        }
    }

    /// Insert a base-dictionary word. `word` must already be lowercase.
    pub fn insert(&mut self, word: &str, count: f64) {
        self.frequencies.insert(word.to_string(), count);
        self.vocab.insert(word.to_string());
        if let Some(fuzzy) = &mut self.fuzzy {
            fuzzy.create_dictionary_entry(word, count.max(0.0) as u64);
        }
    }

    /// Insert a custom word with the synthetic dominating frequency.
    pub fn insert_custom(&mut self, word: &str) {
        self.custom.insert(word.to_string());
        self.vocab.insert(word.to_string());
        self.frequencies
            .insert(word.to_string(), CUSTOM_WORD_FREQUENCY);
        if let Some(fuzzy) = &mut self.fuzzy {
            fuzzy.create_dictionary_entry(word, CUSTOM_WORD_FREQUENCY as u64);
        }
    }

    /// Remove a custom word from all in-memory structures.
    ///
    /// The fuzzy index keeps its entry (SymSpell has no removal); stale
    /// index hits are filtered out by the vocabulary check at scoring
    /// time.
    pub fn remove_custom(&mut self, word: &str) {
        self.custom.remove(word);
        self.vocab.remove(word);
        self.frequencies.remove(word);
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vocab.contains(word) || self.custom.contains(word)
    }

    pub fn is_custom(&self, word: &str) -> bool {
        self.custom.contains(word)
    }

    pub fn in_base_vocab(&self, word: &str) -> bool {
        self.vocab.contains(word)
    }

    pub fn frequency(&self, word: &str) -> Option<f64> {
        self.frequencies.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Candidate terms for a lowercased surface token.
    ///
    /// The token itself always comes first, then fuzzy matches within
    /// `max_distance`, then every single-adjacent-transposition of the
    /// token. Deduplicated, insertion order preserved. Without a fuzzy
    /// index only the token itself is returned.
    pub fn candidates(&self, token: &str, max_distance: usize) -> Vec<String> {
        let Some(fuzzy) = &self.fuzzy else {
            return vec![token.to_string()];
        };

        let mut out = vec![token.to_string()];
        let mut seen: HashSet<String> = HashSet::from([token.to_string()]);

        for term in fuzzy.lookup_all(token, max_distance) {
            if seen.insert(term.clone()) {
                out.push(term);
            }
        }

        let chars: Vec<char> = token.chars().collect();
        for i in 0..chars.len().saturating_sub(1) {
            let mut swapped = chars.clone();
            swapped.swap(i, i + 1);
            let cand: String = swapped.into_iter().collect();
            if seen.insert(cand.clone()) {
                out.push(cand);
            }
        }
        out
    }
}

fn parse_count(raw: &str) -> Option<f64> {
    if let Ok(count) = raw.parse::<i64>() {
        return Some(count as f64);
    }
    raw.parse::<f64>().ok().map(f64::trunc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dictionary(lines: &[&str]) -> (tempfile::NamedTempFile, std::path::PathBuf) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        let path = file.path().to_path_buf();
        (file, path)
    }

    #[test]
    fn load_reads_word_count_lines() {
        let (_file, path) = write_dictionary(&["привет 1000000", "мир 500000"]);
        let lexicon = Lexicon::load(&path, Some(2)).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.frequency("привет"), Some(1_000_000.0));
        assert!(lexicon.contains("мир"));
    }

    #[test]
    fn load_lowercases_words() {
        let (_file, path) = write_dictionary(&["Привет 1000"]);
        let lexicon = Lexicon::load(&path, None).unwrap();
        assert!(lexicon.contains("привет"));
        assert!(!lexicon.contains("Привет"));
    }

    #[test]
    fn load_skips_malformed_lines() {
        let (_file, path) = write_dictionary(&[
            "привет 1000000",
            "одинокое_слово",
            "мир не_число",
            "",
            "кот 100000",
        ]);
        let lexicon = Lexicon::load(&path, None).unwrap();
        assert_eq!(lexicon.len(), 2, "only well-formed lines should load");
    }

    #[test]
    fn load_accepts_real_counts_truncated() {
        let (_file, path) = write_dictionary(&["слово 123.9"]);
        let lexicon = Lexicon::load(&path, None).unwrap();
        assert_eq!(lexicon.frequency("слово"), Some(123.0));
    }

    #[test]
    fn load_missing_file_is_fatal() {
        let result = Lexicon::load(Path::new("/nonexistent/ru.txt"), None);
        assert!(matches!(
            result,
            Err(PravkaError::DictionaryNotFound { .. })
        ));
    }

    #[test]
    fn custom_words_join_every_structure() {
        let mut lexicon = Lexicon::empty(Some(2));
        lexicon.insert_custom("фубар");

        assert!(lexicon.contains("фубар"));
        assert!(lexicon.is_custom("фубар"));
        assert_eq!(lexicon.frequency("фубар"), Some(CUSTOM_WORD_FREQUENCY));
        assert!(
            lexicon.candidates("фубар", 2).contains(&"фубар".to_string()),
            "fuzzy index should know the custom word"
        );
    }

    #[test]
    fn removed_custom_words_leave_every_structure() {
        let mut lexicon = Lexicon::empty(Some(2));
        lexicon.insert_custom("фубар");
        lexicon.remove_custom("фубар");

        assert!(!lexicon.contains("фубар"));
        assert!(!lexicon.is_custom("фубар"));
        assert_eq!(lexicon.frequency("фубар"), None);
    }

    #[test]
    fn candidates_start_with_the_token() {
        let mut lexicon = Lexicon::empty(Some(2));
        lexicon.insert("кто", 1000.0);
        let candidates = lexicon.candidates("кот", 2);
        assert_eq!(candidates[0], "кот");
    }

    #[test]
    fn candidates_include_fuzzy_matches_and_transpositions() {
        let mut lexicon = Lexicon::empty(Some(2));
        lexicon.insert("привет", 1_000_000.0);
        let candidates = lexicon.candidates("превет", 2);
        assert!(candidates.contains(&"привет".to_string()), "fuzzy match");
        assert!(
            candidates.contains(&"рпевет".to_string()),
            "adjacent transposition of the surface"
        );
    }

    #[test]
    fn candidates_are_deduplicated() {
        let mut lexicon = Lexicon::empty(Some(2));
        lexicon.insert("кто", 1000.0);
        lexicon.insert("кот", 1000.0);
        // кто appears both as a fuzzy match and as a transposition
        let candidates = lexicon.candidates("кот", 2);
        let ktos = candidates.iter().filter(|c| c.as_str() == "кто").count();
        assert_eq!(ktos, 1);
    }

    #[test]
    fn candidates_without_fuzzy_index_are_the_token_alone() {
        let lexicon = Lexicon::empty(None);
        assert_eq!(lexicon.candidates("превет", 2), vec!["превет"]);
    }
}
