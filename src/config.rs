//! Configuration for the correction engine and CLI.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub corrector: CorrectorConfig,
}

/// Data file locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Frequency dictionary, one `word count` per line.
    pub path: PathBuf,
    /// Optional morphology table for the bundled analyser.
    pub morphology: Option<PathBuf>,
    /// Optional file-backed custom word store.
    pub custom_words: Option<PathBuf>,
}

/// Tuning surface of the scoring and decision engine.
///
/// Immutable after engine construction. The defaults are the tuned
/// values the engine ships with; raise `margin_threshold` or the taus to
/// make replacement more conservative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Upper bound passed to the fuzzy lookup.
    pub max_edit_distance: usize,
    /// Temperature `T`; raw frequencies are raised to `1/T`.
    pub freq_temperature: f64,
    /// Cap on the per-token hint list length.
    pub top_k_suggestions: usize,
    /// Coefficient on the log-prior.
    pub beta_weight: f64,
    /// Coefficient on the weighted edit cost.
    pub lambda_penalty: f64,
    /// Coefficient on the morphology bonus.
    pub gamma_morph: f64,
    /// Minimum best-vs-runner-up gap to allow a replacement.
    pub margin_threshold: f64,
    /// Minimum gain for replacing an in-vocabulary surface.
    pub tau_in_vocab: f64,
    /// Minimum gain for replacing an out-of-vocabulary surface.
    pub tau_out_vocab: f64,
    /// Consult the fuzzy index for candidates.
    pub use_symspell: bool,
    /// Compute morphological agreement bonuses.
    pub use_morphology: bool,
    /// Let surrounding tokens influence scoring.
    pub enable_context: bool,
    /// Leave tokens of one or two characters untouched.
    pub filter_short_words: bool,
    /// Cost of one adjacent transposition.
    pub transpose_cost: f64,
    /// Cost of one insertion or deletion.
    pub neighbor_ins_del: f64,
    /// Substitution cost for adjacent keys.
    pub keyboard_near_sub: f64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ru.txt"),
            morphology: None,
            custom_words: None,
        }
    }
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: defaults::MAX_EDIT_DISTANCE,
            freq_temperature: defaults::FREQ_TEMPERATURE,
            top_k_suggestions: defaults::TOP_K_SUGGESTIONS,
            beta_weight: defaults::BETA_WEIGHT,
            lambda_penalty: defaults::LAMBDA_PENALTY,
            gamma_morph: defaults::GAMMA_MORPH,
            margin_threshold: defaults::MARGIN_THRESHOLD,
            tau_in_vocab: defaults::TAU_IN_VOCAB,
            tau_out_vocab: defaults::TAU_OUT_VOCAB,
            use_symspell: true,
            use_morphology: true,
            enable_context: true,
            filter_short_words: true,
            transpose_cost: defaults::TRANSPOSE_COST,
            neighbor_ins_del: defaults::NEIGHBOR_INS_DEL,
            keyboard_near_sub: defaults::KEYBOARD_NEAR_SUB,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - PRAVKA_DICTIONARY → dictionary.path
    /// - PRAVKA_MORPHOLOGY → dictionary.morphology
    /// - PRAVKA_CUSTOM_WORDS → dictionary.custom_words
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("PRAVKA_DICTIONARY")
            && !path.is_empty()
        {
            self.dictionary.path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("PRAVKA_MORPHOLOGY")
            && !path.is_empty()
        {
            self.dictionary.morphology = Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("PRAVKA_CUSTOM_WORDS")
            && !path.is_empty()
        {
            self.dictionary.custom_words = Some(PathBuf::from(path));
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/pravka/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .expect("Could not determine config directory")
            .join("pravka")
            .join("config.toml")
    }
}
