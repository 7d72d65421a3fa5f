//! Per-item inspection state.
//!
//! One [`InspectionItem`] wraps one raw external record and its derived
//! draft through the whole pipeline. The status lifecycle is a small state
//! machine:
//!
//! ```text
//! Pending ──(orchestrator)──> Valid | NeedsCatalogInfo | Duplicate
//! NeedsCatalogInfo ──(user supplies short description)──> Valid
//! ```
//!
//! No other transitions exist. `Duplicate` items cannot be promoted inside
//! this workflow; they must be reviewed and edited outside the pipeline.
//! Terminal items are consumed on commit or discarded when the session is
//! cancelled; there is no cross-session identity.

use ingest::{AcquisitionItem, RawExternalRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an item under inspection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    /// Created, not yet enriched or classified.
    Pending,
    /// Ready for commit.
    Valid,
    /// Missing a local short description; needs manual resolution.
    NeedsCatalogInfo,
    /// Near-duplicate of an already-registered item; excluded from commit.
    Duplicate,
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InspectionStatus::Pending => "pending",
            InspectionStatus::Valid => "valid",
            InspectionStatus::NeedsCatalogInfo => "needs catalog info",
            InspectionStatus::Duplicate => "duplicate",
        };
        f.write_str(label)
    }
}

/// One raw record and its derived draft, tracked through enrichment,
/// classification, and resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectionItem {
    /// The external record exactly as fetched.
    pub original: RawExternalRecord,
    /// The mapped draft item. `short_description` is filled from the local
    /// catalog, from the fallback truncation, or by the user.
    pub item: AcquisitionItem,
    /// Current lifecycle status.
    pub status: InspectionStatus,
    /// Ordered human-readable findings (duplicate keys, enrichment
    /// failures, resolution hints).
    pub messages: Vec<String>,
    /// Staging field for the short description the user types while
    /// resolving a `NeedsCatalogInfo` item.
    pub user_short_description: String,
    /// Full description as the external catalog knows it, when found.
    pub full_external_description: Option<String>,
    /// PDM category name from the external catalog, when found.
    pub category_name: Option<String>,
    /// Whether the local reference catalog already had this code.
    pub catalog_cataloged: bool,
}

impl InspectionItem {
    /// A freshly created item, before enrichment and classification.
    pub fn pending(original: RawExternalRecord, item: AcquisitionItem) -> Self {
        Self {
            original,
            item,
            status: InspectionStatus::Pending,
            messages: Vec::new(),
            user_short_description: String::new(),
            full_external_description: None,
            category_name: None,
            catalog_cataloged: false,
        }
    }
}
