//! Lenient money parsing for external price strings.
//!
//! Prices in external records use Brazilian formatting: `.` groups thousands
//! and `,` marks decimals (`"1.234,56"`). Parsing never fails; garbage maps
//! to `0.0` so a malformed price can still flow through the pipeline and be
//! surfaced to the user instead of aborting a batch.

/// Parses a money string in `"1.234,56"` style into an `f64`.
///
/// Grouping dots are removed, the decimal comma becomes a dot, and the
/// result is parsed as a float. Unparseable input yields `0.0`, and so do
/// `"inf"`/`"NaN"` spellings the float parser would otherwise accept: a
/// price is always finite.
pub fn parse_money(input: &str) -> f64 {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|ch| *ch != '.')
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Rounds a money value to an exact integer cent count.
///
/// Price equality in the duplicate matcher is cent-exact: comparing
/// `cents(a) == cents(b)` sidesteps float drift from parsing and arithmetic.
pub fn cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}
