//! Default tuning constants for the correction engine.
//!
//! This module provides shared constants used across the configuration
//! types to ensure consistency and eliminate duplication.

/// Default maximum edit distance passed to the fuzzy index.
///
/// Two edits cover the vast majority of real typos while keeping lookup
/// fast; the SymSpell index is built with the same bound.
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Default frequency temperature `T`.
///
/// Raw counts are raised to `1/T` before taking the log, flattening the
/// prior so very frequent words do not drown out the edit-cost signal.
pub const FREQ_TEMPERATURE: f64 = 2.0;

/// Default cap on the per-token hint list length.
pub const TOP_K_SUGGESTIONS: usize = 8;

/// Default coefficient on the log-prior term.
pub const BETA_WEIGHT: f64 = 1.0;

/// Default coefficient on the weighted edit cost.
pub const LAMBDA_PENALTY: f64 = 0.9;

/// Default coefficient on the morphological agreement bonus.
pub const GAMMA_MORPH: f64 = 1.05;

/// Default minimum best-vs-runner-up score gap to allow a replacement.
pub const MARGIN_THRESHOLD: f64 = 0.25;

/// Default minimum gain over the surface baseline when the surface is in
/// the vocabulary. Higher than the out-of-vocabulary threshold: replacing
/// a known word needs stronger evidence.
pub const TAU_IN_VOCAB: f64 = 0.5;

/// Default minimum gain over the surface baseline when the surface is
/// out of vocabulary.
pub const TAU_OUT_VOCAB: f64 = 0.3;

/// Default cost of one adjacent transposition.
pub const TRANSPOSE_COST: f64 = 0.6;

/// Default cost of one character insertion or deletion.
pub const NEIGHBOR_INS_DEL: f64 = 0.9;

/// Default substitution cost for keys adjacent on the keyboard.
pub const KEYBOARD_NEAR_SUB: f64 = 0.6;

/// Synthetic frequency assigned to custom words.
///
/// Large enough that a custom term dominates the prior of every natural
/// word, so an in-vocabulary custom candidate near a typo essentially
/// always wins.
pub const CUSTOM_WORD_FREQUENCY: f64 = 1_000_000_000.0;

/// Frequency floor for out-of-vocabulary words.
///
/// Keeps OOV words representable in log space instead of mapping them to
/// negative infinity.
pub const FREQUENCY_FLOOR: f64 = 1e-12;
