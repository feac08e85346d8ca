//! End-to-end correction scenarios against a fixture lexicon.

use std::io::Write;
use std::sync::Arc;

use pravka::config::CorrectorConfig;
use pravka::correction::{Decision, SpellCorrector};
use pravka::customdict::MemoryStore;
use pravka::morphology::{MorphAnalyzer, Parse, TableMorphAnalyzer, grammar};

const DICTIONARY: &[(&str, u64)] = &[
    ("привет", 1_000_000),
    ("мир", 500_000),
    ("кот", 100_000),
    ("от", 5_000_000),
    ("она", 8_000_000),
    ("пришла", 5_000_000),
    ("пришёл", 100_000),
    ("дом", 300_000),
    ("хорошо", 400_000),
];

fn write_dictionary() -> (tempfile::NamedTempFile, std::path::PathBuf) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for (word, count) in DICTIONARY {
        writeln!(file, "{} {}", word, count).unwrap();
    }
    file.flush().unwrap();
    let path = file.path().to_path_buf();
    (file, path)
}

fn analyzer() -> Arc<dyn MorphAnalyzer> {
    Arc::new(TableMorphAnalyzer::from_entries([
        (
            "пришла".to_string(),
            Parse::new(grammar::VERB, grammar::FEMININE, grammar::SINGULAR, "", "прийти"),
        ),
        (
            "пришёл".to_string(),
            Parse::new(grammar::VERB, grammar::MASCULINE, grammar::SINGULAR, "", "прийти"),
        ),
        (
            "она".to_string(),
            Parse::new(grammar::PRONOUN, grammar::FEMININE, grammar::SINGULAR, "", "она"),
        ),
    ]))
}

fn build_corrector(config: CorrectorConfig) -> (tempfile::NamedTempFile, SpellCorrector) {
    let (file, path) = write_dictionary();
    let corrector = SpellCorrector::new(
        config,
        &path,
        Some(analyzer()),
        Some(Box::new(MemoryStore::new())),
    )
    .expect("fixture dictionary should load");
    (file, corrector)
}

#[test]
fn clean_text_passes_through() {
    let (_file, corrector) = build_corrector(CorrectorConfig::default());
    let result = corrector.correct_text("привет мир", false);
    assert_eq!(result.corrected, "привет мир");
    assert!(result.detailed_suggestions.is_empty());
    assert!(result.suggestions.is_empty());
}

#[test]
fn one_edit_typo_is_auto_replaced() {
    let (_file, corrector) = build_corrector(CorrectorConfig::default());
    let result = corrector.correct_text("превет мир", false);
    assert_eq!(result.corrected, "привет мир");

    let info = result.detailed_suggestions.get(&0).expect("position 0");
    assert_eq!(info.decision, Decision::AutoReplace);
    assert_eq!(info.suggestions[0], "привет");
}

#[test]
fn casing_and_punctuation_are_preserved() {
    let (_file, corrector) = build_corrector(CorrectorConfig::default());
    let result = corrector.correct_text("Превет, МИР!", false);
    assert_eq!(result.corrected, "Привет, МИР!");
}

#[test]
fn short_in_vocab_word_is_not_shortened() {
    let (_file, corrector) = build_corrector(CorrectorConfig::default());
    // "от" outranks "кот" by frequency but must not win on a short token
    let result = corrector.correct_text("кот", false);
    assert_eq!(result.corrected, "кот");
}

#[test]
fn custom_word_survives_correction() {
    let (_file, corrector) = build_corrector(CorrectorConfig::default());
    corrector.add_custom_word("фубар").unwrap();

    assert!(corrector.knows("фубар"), "custom word joins the vocabulary");
    let result = corrector.correct_text("фубар", false);
    assert_eq!(result.corrected, "фубар");
}

#[test]
fn custom_word_dominance_holds_for_near_typos() {
    let (_file, corrector) = build_corrector(CorrectorConfig::default());
    corrector.add_custom_word("абвгд").unwrap();

    let result = corrector.correct_text("абвгд", false);
    assert_eq!(result.corrected, "абвгд");
    for info in result.detailed_suggestions.values() {
        assert_ne!(
            info.decision,
            Decision::AutoReplace,
            "a custom word must never be replaced"
        );
    }
}

#[test]
fn morphology_bonus_fixes_gender_disagreement() {
    let (_file, corrector) = build_corrector(CorrectorConfig::default());
    let result = corrector.correct_text("она пришёл", false);
    assert_eq!(
        result.corrected, "она пришла",
        "the feminine pronoun should pull in the agreeing verb"
    );
}

#[test]
fn vocabulary_words_are_idempotent() {
    let (_file, corrector) = build_corrector(CorrectorConfig::default());
    for (word, _) in DICTIONARY {
        if word.chars().count() <= 2 {
            continue;
        }
        let result = corrector.correct_text(word, false);
        assert_eq!(
            result.corrected, *word,
            "in-vocabulary word {word:?} must correct to itself"
        );
    }
}

#[test]
fn non_letter_tokens_are_untouched() {
    let (_file, corrector) = build_corrector(CorrectorConfig::default());
    let input = "кот, дом — 123…  мир!";
    let result = corrector.correct_text(input, false);
    assert_eq!(
        result.corrected, input,
        "clean text with punctuation and digits must reconstruct exactly"
    );
}

#[test]
fn raising_margin_threshold_only_demotes_replacements() {
    let (_file, lenient) = build_corrector(CorrectorConfig::default());
    let (_file2, strict) = build_corrector(CorrectorConfig {
        margin_threshold: 100.0,
        ..CorrectorConfig::default()
    });

    let lenient_result = lenient.correct_text("превет мир", false);
    let strict_result = strict.correct_text("превет мир", false);

    assert_eq!(lenient_result.corrected, "привет мир");
    assert_eq!(strict_result.corrected, "превет мир");
    assert_eq!(
        strict_result.detailed_suggestions.get(&0).unwrap().decision,
        Decision::HintOnly
    );
}

#[test]
fn raising_gain_threshold_only_demotes_replacements() {
    let (_file, strict) = build_corrector(CorrectorConfig {
        tau_out_vocab: 100.0,
        tau_in_vocab: 100.0,
        ..CorrectorConfig::default()
    });
    let result = strict.correct_text("превет мир", false);
    assert_eq!(result.corrected, "превет мир");
}

#[test]
fn alternatives_carry_scores_in_descending_order() {
    let (_file, corrector) = build_corrector(CorrectorConfig::default());
    let result = corrector.correct_text("превет мир", false);
    assert!(!result.suggestions.is_empty());
    for pair in result.suggestions.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "alternatives must be ranked best first"
        );
    }
}

#[test]
fn removed_custom_word_stops_being_known() {
    let (_file, corrector) = build_corrector(CorrectorConfig::default());
    corrector.add_custom_word("фубар").unwrap();
    corrector.remove_custom_word("фубар").unwrap();
    assert!(!corrector.knows("фубар"));
}

#[test]
fn concurrent_corrections_share_one_engine() {
    let (_file, corrector) = build_corrector(CorrectorConfig::default());
    let corrector = Arc::new(corrector);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let corrector = Arc::clone(&corrector);
            std::thread::spawn(move || {
                for _ in 0..25 {
                    let result = corrector.correct_text("превет мир", false);
                    assert_eq!(result.corrected, "привет мир");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn missing_dictionary_is_fatal() {
    let result = SpellCorrector::new(
        CorrectorConfig::default(),
        std::path::Path::new("/nonexistent/ru.txt"),
        None,
        None,
    );
    assert!(result.is_err());
}
