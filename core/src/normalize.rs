use alloc::string::String;

/// Canonical form used to compare answers: lower-cased, keeping only ASCII letters and digits.
///
/// Whitespace, punctuation and anything outside `[a-z0-9]` after lowering is dropped rather than folded, so `"Café"`
/// normalizes to `"caf"`.
pub fn normalize_answer(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

pub fn answers_match(guess: &str, word: &str) -> bool {
    normalize_answer(guess) == normalize_answer(word)
}
