//! Word tokenizer for the diff engine.
//!
//! Splits on Unicode word boundaries (UAX #29). Words, whitespace runs and
//! punctuation each come out as their own token, and concatenating the tokens
//! gives back the input byte for byte.

use unicode_segmentation::UnicodeSegmentation;

/// Split `text` into word, whitespace and punctuation tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_word_bounds().collect()
}

/// Whether a token counts as a word for statistics (contains a letter or digit).
#[must_use]
pub fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}
