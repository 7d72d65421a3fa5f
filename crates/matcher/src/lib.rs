//! Flexible duplicate matching for acquisition items.
//!
//! Given a candidate item and a pool of already-registered items, this crate
//! decides duplicate / not-duplicate and reports which fields tied the pair
//! together. The algorithm is deliberately *flexible* rather than simple
//! equality: identifiers and descriptions are canonicalized through the
//! `normalize` crate first, so formatting differences (separators, casing,
//! diacritics) never cause false negatives.
//!
//! The decision is two-phase: a mandatory contract key (tender + purchasing
//! unit + cent-exact price) gates the comparison, then at least one item-key
//! criterion (catalog code, full description, or non-empty short
//! description) must also agree. Pool scans are insertion-order,
//! first-match-wins.

mod engine;
mod types;

pub use crate::engine::{find_duplicate, is_flexible_duplicate};
pub use crate::types::{DuplicateCheckResult, MatchKey};
