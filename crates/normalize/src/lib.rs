//! Canonical normalization layer for acquisition-item comparison.
//!
//! External procurement data arrives in wildly inconsistent formats: mixed
//! casing, stray diacritics, grouping dots inside numbers, procurement
//! numbers written as `"90.001/2025"` in one record and `"9000125"` in the
//! next. Every comparison the duplicate matcher performs runs through this
//! module first so that formatting differences never cause false negatives.
//!
//! ## What we do
//!
//! - Text canonicalization (trim, strip diacritics, uppercase, collapse
//!   whitespace) via [`normalize_text`]
//! - Digit extraction via [`normalize_digits`]
//! - Procurement-number canonicalization (sequence + two-digit year) via
//!   [`normalize_procurement_number`]
//! - Lenient money parsing via [`parse_money`], with [`cents`] as the
//!   cent-exact comparison key
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Every function here is
//! total: malformed input degrades to an empty string or `0.0`, never an
//! error. Same input = same output forever.
//!
//! ## Invariants worth knowing
//!
//! - [`normalize_text`] is idempotent: applying it twice equals applying it
//!   once.
//! - [`normalize_procurement_number`] maps `"90.001/2025"` and `"9000125"`
//!   to the same key, `"9000125"`.
//! - [`parse_money`] reads `"1.234,56"` as `1234.56` and returns `0.0` for
//!   anything unparseable.

mod money;
mod procurement;
mod text;

pub use crate::money::{cents, parse_money};
pub use crate::procurement::normalize_procurement_number;
pub use crate::text::{normalize_digits, normalize_text};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_basic() {
        assert_eq!(normalize_text("  caneta   azul  "), "CANETA AZUL");
        assert_eq!(normalize_text("Aquisi\u{00E7}\u{00E3}o"), "AQUISICAO");
        assert_eq!(normalize_text("papel\tA4\nbranco"), "PAPEL A4 BRANCO");
    }

    #[test]
    fn normalize_text_idempotent() {
        let inputs = [
            "",
            "   ",
            "Ca\u{0301}lculo  de \u{00D3}leo",
            "ALREADY NORMAL",
            "emoji \u{1f600} ok",
        ];
        for input in inputs {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn normalize_text_handles_composed_and_decomposed() {
        // U+00E9 vs e + combining acute must canonicalize identically.
        assert_eq!(normalize_text("caf\u{00E9}"), normalize_text("cafe\u{0301}"));
        assert_eq!(normalize_text("caf\u{00E9}"), "CAFE");
    }

    #[test]
    fn normalize_digits_strips_everything_else() {
        assert_eq!(normalize_digits("90.001/24"), "9000124");
        assert_eq!(normalize_digits("UASG 160.001-x"), "160001");
        assert_eq!(normalize_digits("no digits"), "");
        assert_eq!(normalize_digits(""), "");
    }

    #[test]
    fn procurement_number_equivalence() {
        // The two real-world spellings of the same tender converge.
        assert_eq!(normalize_procurement_number("90.001/2025"), "9000125");
        assert_eq!(normalize_procurement_number("9000125"), "9000125");
        assert_eq!(normalize_procurement_number("90.001/24"), "9000124");
    }

    #[test]
    fn procurement_number_short_inputs_returned_as_is() {
        assert_eq!(normalize_procurement_number("1/2"), "12");
        assert_eq!(normalize_procurement_number("7"), "7");
        assert_eq!(normalize_procurement_number(""), "");
    }

    #[test]
    fn procurement_number_strips_leading_sequence_zeros() {
        assert_eq!(normalize_procurement_number("001/24"), "124");
        assert_eq!(normalize_procurement_number("00090/2023"), "9023");
    }

    #[test]
    fn parse_money_brazilian_format() {
        assert_eq!(parse_money("1.234,56"), 1234.56);
        assert_eq!(parse_money("35,00"), 35.0);
        assert_eq!(parse_money("1.234.567,89"), 1234567.89);
    }

    #[test]
    fn parse_money_failure_is_zero() {
        assert_eq!(parse_money("not a number"), 0.0);
        assert_eq!(parse_money(""), 0.0);
        assert_eq!(parse_money("R$ abc"), 0.0);
        assert_eq!(parse_money("inf"), 0.0);
        assert_eq!(parse_money("NaN"), 0.0);
    }

    #[test]
    fn cents_is_exact_at_two_decimals() {
        assert_eq!(cents(35.0), 3500);
        assert_eq!(cents(0.1 + 0.2), 30);
        assert_eq!(cents(1234.56), 123456);
    }
}
