//! Procurement-number (pregão) canonicalization.
//!
//! Tender identifiers arrive as `"90.001/2025"`, `"90001/25"`, or already
//! flattened as `"9000125"`. All three name the same auction. The canonical
//! key is the sequence number with leading zeros stripped, concatenated with
//! the two-digit year, no separators.

use crate::text::normalize_digits;

/// Reduces a free-form procurement number to its canonical comparison key.
///
/// The input is first reduced to digits. Fewer than 3 digits means there is
/// no reliable year to extract, so the digit string is returned as-is.
/// Otherwise a trailing year is split off heuristically:
///
/// - if the last 4 digits start with `"20"` they are read as a 4-digit year
///   and the final 2 of them become the year suffix;
/// - otherwise the last 2 digits become the year suffix.
///
/// Leading zeros are stripped from the remaining sequence portion, and the
/// result is `sequence + year` concatenated.
pub fn normalize_procurement_number(input: &str) -> String {
    let digits = normalize_digits(input);
    if digits.len() < 3 {
        return digits;
    }

    let (sequence, year) = if digits.len() >= 4 && digits[digits.len() - 4..].starts_with("20") {
        // 4-digit year, e.g. "...2025" -> year "25".
        (&digits[..digits.len() - 4], &digits[digits.len() - 2..])
    } else {
        (&digits[..digits.len() - 2], &digits[digits.len() - 2..])
    };

    let sequence = sequence.trim_start_matches('0');
    format!("{sequence}{year}")
}
