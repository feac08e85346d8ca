//! Lossless tokenisation and casing helpers.
//!
//! The input splits into four disjoint token classes: runs of
//! Cyrillic/Latin letters, runs of digits, runs of whitespace, and single
//! other characters. Concatenating the tokens reproduces the input
//! exactly, which is what lets the driver rebuild the corrected string
//! around untouched punctuation and spacing.

/// Character class driving the run-based scanner.
#[derive(PartialEq, Clone, Copy)]
enum CharClass {
    Letter,
    Digit,
    Space,
    Other,
}

fn classify(c: char) -> CharClass {
    if is_letter_char(c) {
        CharClass::Letter
    } else if c.is_ascii_digit() {
        CharClass::Digit
    } else if c.is_whitespace() {
        CharClass::Space
    } else {
        CharClass::Other
    }
}

fn is_letter_char(c: char) -> bool {
    c.is_ascii_alphabetic() || ('а'..='я').contains(&c) || ('А'..='Я').contains(&c) || c == 'ё' || c == 'Ё'
}

/// Split `text` into letter runs, digit runs, whitespace runs, and single
/// punctuation characters, preserving every input character.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_class = CharClass::Other;

    for c in text.chars() {
        let class = classify(c);
        let extends_run = class == current_class && class != CharClass::Other;
        if !current.is_empty() && !extends_run {
            tokens.push(std::mem::take(&mut current));
        }
        current.push(c);
        current_class = class;
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Whether a token is a pure letter run (a "word token").
pub fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(is_letter_char)
}

/// Whether a token is Titlecase: first character uppercase, rest lowercase.
pub fn is_titlecase(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest: String = chars.collect();
    first.to_uppercase().collect::<String>() == first.to_string() && rest.to_lowercase() == rest
}

/// Whether a token is entirely uppercase.
pub fn is_all_caps(s: &str) -> bool {
    s.to_uppercase() == s
}

/// Titlecase a word: first character uppercase, rest lowercase.
pub fn titlecase(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Re-case `replacement` to mirror the casing pattern of `surface`.
///
/// Titlecase and ALL-CAPS surfaces carry their casing over; anything else
/// takes the replacement verbatim (replacements are lowercased terms).
pub fn match_case(surface: &str, replacement: &str) -> String {
    if is_titlecase(surface) {
        titlecase(replacement)
    } else if is_all_caps(surface) {
        replacement.to_uppercase()
    } else {
        replacement.to_string()
    }
}
