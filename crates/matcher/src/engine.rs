use ingest::AcquisitionItem;
use normalize::{cents, normalize_digits, normalize_procurement_number, normalize_text};

use crate::types::{DuplicateCheckResult, MatchKey};

/// Purchasing-unit codes are compared on their first 6 digits only; source
/// systems sometimes append extra trailing digits to the same UASG code.
const UNIT_CODE_SIGNIFICANT_DIGITS: usize = 6;

fn unit_code_key(raw: &str) -> String {
    let digits = normalize_digits(raw);
    // Codes shorter than 6 digits after normalization compare in full.
    digits.chars().take(UNIT_CODE_SIGNIFICANT_DIGITS).collect()
}

/// Decides whether `candidate` is a flexible duplicate of `existing`.
///
/// Two-phase, mandatory-then-optional:
///
/// 1. **Contract key** (all three must match, else immediately
///    not-duplicate): canonical procurement number, first 6 digits of the
///    purchasing-unit code, and cent-exact unit price.
/// 2. **Item key** (at least one must match): catalog-code digits, canonical
///    full description, or canonical short description (counted only when
///    non-empty).
///
/// The contract key alone (same tender, same unit, same price) is a common
/// coincidence across unrelated line items; phase two disambiguates intent
/// without requiring byte-exact descriptions. Tolerance comes from
/// normalization, not fuzzy distance.
pub fn is_flexible_duplicate(
    candidate: &AcquisitionItem,
    existing: &AcquisitionItem,
) -> DuplicateCheckResult {
    // Phase 1: the mandatory contract key.
    if normalize_procurement_number(&candidate.procurement_number)
        != normalize_procurement_number(&existing.procurement_number)
    {
        return DuplicateCheckResult::no_match();
    }
    if unit_code_key(&candidate.purchasing_unit_code) != unit_code_key(&existing.purchasing_unit_code)
    {
        return DuplicateCheckResult::no_match();
    }
    if cents(candidate.unit_price) != cents(existing.unit_price) {
        return DuplicateCheckResult::no_match();
    }

    // Phase 2: at least one item-key criterion.
    let mut matching_keys = Vec::new();

    let candidate_code = normalize_digits(&candidate.catalog_code);
    if !candidate_code.is_empty() && candidate_code == normalize_digits(&existing.catalog_code) {
        matching_keys.push(MatchKey::CatalogCode);
    }

    if normalize_text(&candidate.full_description) == normalize_text(&existing.full_description) {
        matching_keys.push(MatchKey::FullDescription);
    }

    let candidate_short = normalize_text(&candidate.short_description);
    if !candidate_short.is_empty()
        && candidate_short == normalize_text(&existing.short_description)
    {
        matching_keys.push(MatchKey::ShortDescription);
    }

    if matching_keys.is_empty() {
        return DuplicateCheckResult::no_match();
    }

    DuplicateCheckResult {
        is_duplicate: true,
        matching_keys,
    }
}

/// Scans `pool` in insertion order and returns the first duplicate of
/// `candidate`, together with the check result explaining which keys
/// matched. First match wins; no best-match scoring is attempted.
pub fn find_duplicate<'a, I>(
    candidate: &AcquisitionItem,
    pool: I,
) -> Option<(&'a AcquisitionItem, DuplicateCheckResult)>
where
    I: IntoIterator<Item = &'a AcquisitionItem>,
{
    for existing in pool {
        let result = is_flexible_duplicate(candidate, existing);
        if result.is_duplicate {
            return Some((existing, result));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(
        catalog_code: &str,
        full_description: &str,
        short_description: &str,
        unit_price: f64,
        procurement_number: &str,
        purchasing_unit_code: &str,
    ) -> AcquisitionItem {
        AcquisitionItem {
            id: "test".into(),
            full_description: full_description.into(),
            short_description: short_description.into(),
            unit_price,
            procurement_number: procurement_number.into(),
            purchasing_unit_code: purchasing_unit_code.into(),
            catalog_code: catalog_code.into(),
        }
    }

    #[test]
    fn reflexive_for_well_formed_items() {
        let x = item("423465", "Caneta azul", "Caneta", 35.0, "90.001/24", "160001");
        let result = is_flexible_duplicate(&x, &x);
        assert!(result.is_duplicate);
        assert_eq!(
            result.matching_keys,
            vec![
                MatchKey::CatalogCode,
                MatchKey::FullDescription,
                MatchKey::ShortDescription
            ]
        );
    }

    #[test]
    fn contract_key_gate_on_unit_code() {
        // Identical descriptions must never flag duplicate across different
        // purchasing units.
        let a = item("423465", "Caneta azul", "", 35.0, "90.001/24", "160001");
        let b = item("423465", "Caneta azul", "", 35.0, "90.001/24", "160002");
        assert!(!is_flexible_duplicate(&a, &b).is_duplicate);
    }

    #[test]
    fn contract_key_gate_on_price() {
        let a = item("423465", "Caneta azul", "", 35.0, "90.001/24", "160001");
        let b = item("423465", "Caneta azul", "", 35.02, "90.001/24", "160001");
        assert!(!is_flexible_duplicate(&a, &b).is_duplicate);
    }

    #[test]
    fn price_compared_cent_exact_not_bitwise() {
        let a = item("423465", "Caneta azul", "", 0.1 + 0.2, "90.001/24", "160001");
        let b = item("423465", "Caneta azul", "", 0.3, "90.001/24", "160001");
        assert!(is_flexible_duplicate(&a, &b).is_duplicate);
    }

    #[test]
    fn procurement_number_formats_converge() {
        let a = item("423465", "Caneta azul", "", 35.0, "90.001/2025", "160001");
        let b = item("423465", "Caneta azul", "", 35.0, "9000125", "160001");
        assert!(is_flexible_duplicate(&a, &b).is_duplicate);
    }

    #[test]
    fn unit_code_trailing_digits_ignored() {
        let a = item("423465", "Caneta azul", "", 35.0, "90.001/24", "160001");
        let b = item("423465", "Caneta azul", "", 35.0, "90.001/24", "16000199");
        assert!(is_flexible_duplicate(&a, &b).is_duplicate);
    }

    #[test]
    fn duplicate_by_description_despite_different_catalog_code() {
        let a = item("423465", "Caneta azul", "", 35.0, "90.001/24", "160001");
        let b = item("999999", "caneta  AZUL", "", 35.0, "90.001/24", "160001");
        let result = is_flexible_duplicate(&a, &b);
        assert!(result.is_duplicate);
        assert_eq!(result.matching_keys, vec![MatchKey::FullDescription]);
    }

    #[test]
    fn contract_key_alone_is_not_enough() {
        // Same tender, unit, and price, but nothing ties the items together.
        let a = item("423465", "Caneta azul", "", 35.0, "90.001/24", "160001");
        let b = item("111111", "Papel A4", "", 35.0, "90.001/24", "160001");
        assert!(!is_flexible_duplicate(&a, &b).is_duplicate);
    }

    #[test]
    fn empty_short_descriptions_do_not_count() {
        let a = item("423465", "Caneta azul", "", 35.0, "90.001/24", "160001");
        let b = item("999999", "Papel A4", "", 35.0, "90.001/24", "160001");
        let result = is_flexible_duplicate(&a, &b);
        assert!(!result.matching_keys.contains(&MatchKey::ShortDescription));
        assert!(!result.is_duplicate);
    }

    #[test]
    fn empty_catalog_codes_do_not_count() {
        let a = item("", "Caneta azul", "", 35.0, "90.001/24", "160001");
        let b = item("", "Papel A4", "", 35.0, "90.001/24", "160001");
        assert!(!is_flexible_duplicate(&a, &b).is_duplicate);
    }

    #[test]
    fn diacritics_and_case_tolerated_in_descriptions() {
        let a = item(
            "423465",
            "Caneta esferográfica AZUL",
            "",
            35.0,
            "90.001/24",
            "160001",
        );
        let b = item(
            "423465",
            "caneta esferografica azul",
            "",
            35.0,
            "90.001/24",
            "160001",
        );
        assert!(is_flexible_duplicate(&a, &b).is_duplicate);
    }

    #[test]
    fn find_duplicate_first_match_wins() {
        let candidate = item("423465", "Caneta azul", "", 35.0, "90.001/24", "160001");
        let first = item("423465", "Outra coisa", "", 35.0, "90.001/24", "160001");
        let second = item("999999", "Caneta azul", "", 35.0, "90.001/24", "160001");
        let pool = vec![first.clone(), second];

        let (hit, result) = find_duplicate(&candidate, &pool).expect("should find a duplicate");
        assert_eq!(hit, &first);
        assert_eq!(result.matching_keys, vec![MatchKey::CatalogCode]);
    }

    #[test]
    fn find_duplicate_empty_pool() {
        let candidate = item("423465", "Caneta azul", "", 35.0, "90.001/24", "160001");
        let pool: Vec<AcquisitionItem> = Vec::new();
        assert!(find_duplicate(&candidate, &pool).is_none());
    }
}
