//! Persistent store capability for user-added dictionary words.
//!
//! The engine keeps custom words in memory and mirrors every change to a
//! store behind this trait. Store failures on add/remove abort the
//! operation before any in-memory state changes; a failure to list words
//! at startup only degrades to an empty custom set.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{PravkaError, Result};

/// Store of custom dictionary words.
///
/// Implementations must be safe to call from concurrent correction
/// threads. Words arrive already lowercased.
pub trait CustomDictStore: Send + Sync {
    /// Insert a word into the store.
    fn add(&self, word: &str) -> Result<()>;

    /// Delete a word from the store.
    fn remove(&self, word: &str) -> Result<()>;

    /// Return all words currently stored.
    fn all(&self) -> Result<Vec<String>>;
}

/// Ephemeral in-memory store, for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    words: Mutex<BTreeSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomDictStore for MemoryStore {
    fn add(&self, word: &str) -> Result<()> {
        self.words.lock().unwrap().insert(word.to_string());
        Ok(())
    }

    fn remove(&self, word: &str) -> Result<()> {
        self.words.lock().unwrap().remove(word);
        Ok(())
    }

    fn all(&self) -> Result<Vec<String>> {
        Ok(self.words.lock().unwrap().iter().cloned().collect())
    }
}

/// File-backed store, one word per line.
///
/// The whole file is rewritten through a temporary sibling on every
/// change so a crash never leaves a half-written list.
pub struct FileStore {
    path: PathBuf,
    words: Mutex<BTreeSet<String>>,
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .field("words", &self.words.lock().unwrap().len())
            .finish()
    }
}

impl FileStore {
    /// Open a store at `path`, reading the current word list if the file
    /// exists.
    pub fn open(path: &Path) -> Result<Self> {
        let words = match std::fs::read_to_string(path) {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeSet::new(),
            Err(e) => {
                return Err(PravkaError::CustomDictStore {
                    message: format!("failed to read '{}': {}", path.display(), e),
                });
            }
        };
        Ok(Self {
            path: path.to_path_buf(),
            words: Mutex::new(words),
        })
    }

    fn persist(&self, words: &BTreeSet<String>) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        let write = || -> std::io::Result<()> {
            let mut file = std::fs::File::create(&tmp)?;
            for word in words {
                writeln!(file, "{}", word)?;
            }
            file.sync_all()?;
            std::fs::rename(&tmp, &self.path)
        };
        write().map_err(|e| PravkaError::CustomDictStore {
            message: format!("failed to write '{}': {}", self.path.display(), e),
        })
    }
}

impl CustomDictStore for FileStore {
    fn add(&self, word: &str) -> Result<()> {
        let mut words = self.words.lock().unwrap();
        if words.insert(word.to_string()) {
            self.persist(&words)?;
        }
        Ok(())
    }

    fn remove(&self, word: &str) -> Result<()> {
        let mut words = self.words.lock().unwrap();
        if words.remove(word) {
            self.persist(&words)?;
        }
        Ok(())
    }

    fn all(&self) -> Result<Vec<String>> {
        Ok(self.words.lock().unwrap().iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        store.add("фубар").unwrap();
        store.add("квукс").unwrap();
        assert_eq!(store.all().unwrap(), vec!["квукс", "фубар"]);

        store.remove("фубар").unwrap();
        assert_eq!(store.all().unwrap(), vec!["квукс"]);
    }

    #[test]
    fn memory_store_add_is_idempotent() {
        let store = MemoryStore::new();
        store.add("слово").unwrap();
        store.add("слово").unwrap();
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn memory_store_remove_missing_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("нет").is_ok());
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.txt");

        let store = FileStore::open(&path).unwrap();
        store.add("фубар").unwrap();
        store.add("абвгд").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.all().unwrap(), vec!["абвгд", "фубар"]);
    }

    #[test]
    fn file_store_remove_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.txt");

        let store = FileStore::open(&path).unwrap();
        store.add("один").unwrap();
        store.add("два").unwrap();
        store.remove("один").unwrap();
        drop(store);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "два");
    }

    #[test]
    fn file_store_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(&dir.path().join("none.txt")).unwrap();
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn file_store_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.txt");
        std::fs::write(&path, "фубар\n\n  \nквукс\n").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.all().unwrap(), vec!["квукс", "фубар"]);
    }

    #[test]
    fn stores_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryStore>();
        assert_send_sync::<FileStore>();
    }
}
