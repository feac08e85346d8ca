//! Keyboard-aware substitution costs for the Russian ЙЦУКЕН layout.
//!
//! Substituting a character with a physically adjacent key is a far more
//! likely typo than reaching across the keyboard, so the weighted edit
//! distance charges substitutions by key proximity. A small table of
//! orthographically confusable pairs (ё/е and friends) gets its own
//! discounted costs regardless of key geometry.

use std::collections::HashMap;
use std::sync::LazyLock;

/// The three letter rows of the Russian layout, top to bottom.
const KEYBOARD_ROWS: [&str; 3] = ["ёйцукенгшщзхъ", "фывапролджэ", "ячсмитьбю"];

/// Confusable pairs with discounted substitution costs, both directions.
const SPECIAL_PAIRS: [(char, char, f64); 4] = [
    ('ё', 'е', 0.2),
    ('й', 'и', 0.3),
    ('ь', 'ъ', 0.4),
    ('ц', 'й', 0.4),
];

/// Cost bucket substitution falls into when the keys are within 1.5 units.
const MID_SUB_COST: f64 = 0.8;
/// Cost bucket for keys within 2.2 units.
const FAR_SUB_COST: f64 = 1.2;
/// Cost for keys further apart, or characters off the letter rows.
const MAX_SUB_COST: f64 = 1.8;

/// Distance reported for characters that are not on the letter rows.
const UNKNOWN_KEY_DISTANCE: f64 = 2.5;

static KEY_POSITIONS: LazyLock<HashMap<char, (i32, i32)>> = LazyLock::new(|| {
    let mut positions = HashMap::new();
    for (row, keys) in KEYBOARD_ROWS.iter().enumerate() {
        for (col, ch) in keys.chars().enumerate() {
            positions.insert(ch, (row as i32, col as i32));
        }
    }
    positions
});

fn lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Euclidean distance between two keys on the layout.
///
/// Characters absent from the letter rows (Latin letters, digits,
/// punctuation) report [`UNKNOWN_KEY_DISTANCE`].
pub fn key_distance(a: char, b: char) -> f64 {
    let (a, b) = (lowercase(a), lowercase(b));
    match (KEY_POSITIONS.get(&a), KEY_POSITIONS.get(&b)) {
        (Some(&(ra, ca)), Some(&(rb, cb))) => {
            let dr = f64::from(ra - rb);
            let dc = f64::from(ca - cb);
            (dr * dr + dc * dc).sqrt()
        }
        _ => UNKNOWN_KEY_DISTANCE,
    }
}

/// Substitution cost for replacing `a` with `b`.
///
/// `near_sub` is the configured cost for keys at distance ≤ 1 (typically
/// below the insertion cost, so a fat-finger substitution is preferred
/// over delete+insert). Case-insensitive.
pub fn substitution_cost(a: char, b: char, near_sub: f64) -> f64 {
    let (a, b) = (lowercase(a), lowercase(b));
    if a == b {
        return 0.0;
    }
    for &(x, y, cost) in &SPECIAL_PAIRS {
        if (a, b) == (x, y) || (a, b) == (y, x) {
            return cost;
        }
    }
    let d = key_distance(a, b);
    if d <= 1.0 {
        near_sub
    } else if d <= 1.5 {
        MID_SUB_COST
    } else if d <= 2.2 {
        FAR_SUB_COST
    } else {
        MAX_SUB_COST
    }
}

/// Whether `a` and `b` differ by exactly one swap of adjacent characters.
///
/// Linear scan; used as a fast path so the common transposition typo
/// skips the full DP.
pub fn is_one_adjacent_swap(a: &str, b: &str) -> bool {
    let ra: Vec<char> = a.chars().collect();
    let rb: Vec<char> = b.chars().collect();
    if ra.len() != rb.len() || ra.len() < 2 {
        return false;
    }
    let Some(diff) = ra.iter().zip(&rb).position(|(x, y)| x != y) else {
        return false;
    };
    if diff + 1 >= ra.len() {
        return false;
    }
    ra[diff] == rb[diff + 1]
        && ra[diff + 1] == rb[diff]
        && ra[diff + 2..] == rb[diff + 2..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_has_zero_distance() {
        assert_eq!(key_distance('а', 'а'), 0.0);
    }

    #[test]
    fn adjacent_keys_have_unit_distance() {
        // а and п sit next to each other on the home row
        assert_eq!(key_distance('а', 'п'), 1.0);
        // symmetric
        assert_eq!(key_distance('п', 'а'), 1.0);
    }

    #[test]
    fn unknown_characters_report_fallback_distance() {
        assert_eq!(key_distance('q', 'а'), UNKNOWN_KEY_DISTANCE);
        assert_eq!(key_distance('7', '!'), UNKNOWN_KEY_DISTANCE);
    }

    #[test]
    fn key_distance_is_case_insensitive() {
        assert_eq!(key_distance('А', 'п'), key_distance('а', 'П'));
    }

    #[test]
    fn identical_characters_cost_nothing() {
        assert_eq!(substitution_cost('к', 'к', 0.6), 0.0);
        assert_eq!(substitution_cost('К', 'к', 0.6), 0.0);
    }

    #[test]
    fn confusable_pairs_get_discounted_costs() {
        assert_eq!(substitution_cost('ё', 'е', 0.6), 0.2);
        assert_eq!(substitution_cost('е', 'ё', 0.6), 0.2);
        assert_eq!(substitution_cost('й', 'и', 0.6), 0.3);
        assert_eq!(substitution_cost('ь', 'ъ', 0.6), 0.4);
        assert_eq!(substitution_cost('ц', 'й', 0.6), 0.4);
    }

    #[test]
    fn near_keys_use_configured_cost() {
        // а/п are adjacent, distance 1.0
        assert_eq!(substitution_cost('а', 'п', 0.6), 0.6);
        assert_eq!(substitution_cost('а', 'п', 0.4), 0.4);
    }

    #[test]
    fn distant_keys_bucket_up() {
        // я (2,0) to э (1,10): far apart on the board
        assert_eq!(substitution_cost('я', 'э', 0.6), MAX_SUB_COST);
        // unknown characters also land in the top bucket
        assert_eq!(substitution_cost('q', 'w', 0.6), MAX_SUB_COST);
    }

    #[test]
    fn diagonal_neighbours_land_in_mid_bucket() {
        // ф (1,0) and я (2,0) are vertical neighbours: distance 1.0
        assert_eq!(substitution_cost('ф', 'я', 0.6), 0.6);
        // ф (1,0) and ч (2,1): diagonal, sqrt(2) ≈ 1.41
        assert_eq!(substitution_cost('ф', 'ч', 0.6), MID_SUB_COST);
    }

    #[test]
    fn detects_single_adjacent_swap() {
        assert!(is_one_adjacent_swap("привет", "рпивет"));
        assert!(is_one_adjacent_swap("кто", "кот"));
        assert!(is_one_adjacent_swap("ab", "ba"));
    }

    #[test]
    fn rejects_non_swaps() {
        assert!(!is_one_adjacent_swap("привет", "привет"));
        assert!(!is_one_adjacent_swap("привет", "превет"));
        assert!(!is_one_adjacent_swap("привет", "привт"));
        // two separate swaps
        assert!(!is_one_adjacent_swap("abcd", "badc"));
        // non-adjacent exchange
        assert!(!is_one_adjacent_swap("abc", "cba"));
    }

    #[test]
    fn rejects_short_and_empty_inputs() {
        assert!(!is_one_adjacent_swap("", ""));
        assert!(!is_one_adjacent_swap("а", "а"));
        assert!(!is_one_adjacent_swap("а", "б"));
    }
}
