use serde::{Deserialize, Serialize};
use std::fmt;

/// Which optional (phase-two) criterion matched between two items.
///
/// The mandatory contract key (procurement number + purchasing unit + price)
/// is not represented here: it either passes as a whole or the comparison is
/// not a duplicate at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchKey {
    /// Catalog (CATMAT/CATSER) codes agree on digit content.
    CatalogCode,
    /// Full descriptions agree after text normalization.
    FullDescription,
    /// Short descriptions agree after text normalization (both non-empty).
    ShortDescription,
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchKey::CatalogCode => "catalog code",
            MatchKey::FullDescription => "full description",
            MatchKey::ShortDescription => "short description",
        };
        f.write_str(label)
    }
}

/// Outcome of one pairwise duplicate check. Transient; produced per
/// comparison, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DuplicateCheckResult {
    /// Whether the pair is considered a duplicate.
    pub is_duplicate: bool,
    /// The phase-two criteria that matched, in check order. Empty when
    /// `is_duplicate` is false.
    pub matching_keys: Vec<MatchKey>,
}

impl DuplicateCheckResult {
    /// A non-duplicate result with no matching keys.
    pub fn no_match() -> Self {
        Self {
            is_duplicate: false,
            matching_keys: Vec::new(),
        }
    }

    /// Human-readable `", "`-joined list of the matching keys, for the
    /// user-facing duplicate message.
    pub fn describe_keys(&self) -> String {
        let labels: Vec<String> = self.matching_keys.iter().map(MatchKey::to_string).collect();
        labels.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_keys_joins_labels() {
        let result = DuplicateCheckResult {
            is_duplicate: true,
            matching_keys: vec![MatchKey::CatalogCode, MatchKey::FullDescription],
        };
        assert_eq!(result.describe_keys(), "catalog code, full description");
    }

    #[test]
    fn no_match_is_empty() {
        let result = DuplicateCheckResult::no_match();
        assert!(!result.is_duplicate);
        assert!(result.matching_keys.is_empty());
        assert_eq!(result.describe_keys(), "");
    }

    #[test]
    fn match_key_serde_snake_case() {
        let json = serde_json::to_string(&MatchKey::FullDescription).unwrap();
        assert_eq!(json, "\"full_description\"");
    }
}
