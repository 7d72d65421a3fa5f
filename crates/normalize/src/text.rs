//! Text and digit canonicalization.
//!
//! The canonical text form is what every description comparison operates on:
//! trimmed, diacritics stripped, uppercased, inner whitespace collapsed to
//! single ASCII spaces. Stripping happens through NFD decomposition followed
//! by removal of combining marks, so composed (`U+00E9`) and decomposed
//! (`e` + `U+0301`) spellings of the same character converge.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalizes free-form text for comparison.
///
/// 1. Split the input on any Unicode whitespace (this both trims the edges
///    and collapses internal runs)
/// 2. NFD-decompose each segment and drop combining marks
/// 3. Uppercase
/// 4. Re-join segments with single ASCII spaces
///
/// Empty or whitespace-only input yields an empty string. The function is
/// idempotent: its output passes through unchanged.
pub fn normalize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for segment in input.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        for ch in segment.nfd() {
            if is_combining_mark(ch) {
                continue;
            }
            for upper in ch.to_uppercase() {
                out.push(upper);
            }
        }
    }
    out
}

/// Canonicalizes text, then keeps only the ASCII digits.
///
/// This is the comparison form for numeric-ish identifiers such as catalog
/// codes and purchasing-unit codes, where punctuation and letters are
/// formatting noise: `"UASG 160.001-x"` becomes `"160001"`.
pub fn normalize_digits(input: &str) -> String {
    normalize_text(input)
        .chars()
        .filter(char::is_ascii_digit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_unicode_whitespace() {
        assert_eq!(normalize_text("a\u{00A0}b"), "A B");
        assert_eq!(normalize_text("  \n\t "), "");
    }

    #[test]
    fn uppercase_expansion_is_kept() {
        // German sharp s expands to SS when uppercased.
        assert_eq!(normalize_text("stra\u{00DF}e"), "STRASSE");
    }

    #[test]
    fn digits_survive_diacritic_stripping() {
        assert_eq!(normalize_digits("n\u{00BA} 12.345"), "12345");
    }
}
