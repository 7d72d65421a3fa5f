//! Core data model types for the ingest crate.
//!
//! These types represent the shape of external procurement search results and
//! the canonical acquisition items that flow to downstream pipeline stages.
//! They are designed to be:
//!
//! - **Serializable**: JSON in and out via serde
//! - **Cloneable**: cheap to clone for pipeline processing
//! - **Comparable**: equality checks for testing
//!
//! # Type Hierarchy
//!
//! ```text
//! RawExternalRecord                 (immutable once fetched)
//! ├── arp_number: String            (ARP / price-registration record ref)
//! ├── catalog_code: String          (CATMAT/CATSER code)
//! ├── full_description: String
//! ├── unit_price: RawMoney          (Number(f64) | Text("1.234,56"))
//! ├── procurement_number: String    (free-form, e.g. "90.001/24")
//! ├── purchasing_unit_code: String  (UASG code)
//! ├── homologated_quantity: Option<f64>
//! └── metadata: RecordMetadata
//!     ├── retrieved_at: Option<DateTime<Utc>>
//!     ├── source_url: Option<String>
//!     └── attributes: Option<Value>
//!
//!         ↓ map_record()
//!
//! AcquisitionItem                   (draft; short_description left empty)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The canonical unit being imported and compared.
///
/// `unit_price` is always `>= 0` for items produced by
/// [`map_record`](crate::map_record); `catalog_code`, when non-empty, is
/// compared only on its digit content by the duplicate matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcquisitionItem {
    /// Opaque identifier, locally generated (UUIDv4) when the item is new.
    pub id: String,
    /// Full descriptive text of the material or service.
    pub full_description: String,
    /// Short catalog description; empty until resolved from the local
    /// catalog or supplied by the user.
    pub short_description: String,
    /// Unit price in currency units (two decimal places significant).
    pub unit_price: f64,
    /// Free-form tender identifier, e.g. `"90.001/24"`.
    pub procurement_number: String,
    /// Numeric-ish contracting-unit (UASG) code.
    pub purchasing_unit_code: String,
    /// Standardized material/service classification (CATMAT/CATSER) code.
    pub catalog_code: String,
}

/// A price value as it appears in external data: sometimes already numeric,
/// sometimes a formatted string like `"1.234,56"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawMoney {
    Number(f64),
    Text(String),
}

impl RawMoney {
    /// Resolves the raw value to a plain amount. Numeric values pass through
    /// unchanged; strings go through the lenient money parser and degrade to
    /// `0.0` when unparseable.
    pub fn amount(&self) -> f64 {
        match self {
            RawMoney::Number(value) => *value,
            RawMoney::Text(text) => normalize::parse_money(text),
        }
    }
}

impl From<f64> for RawMoney {
    fn from(value: f64) -> Self {
        RawMoney::Number(value)
    }
}

impl From<&str> for RawMoney {
    fn from(value: &str) -> Self {
        RawMoney::Text(value.to_string())
    }
}

/// Provenance metadata attached to a raw external record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordMetadata {
    /// When the record was fetched from the external catalog.
    pub retrieved_at: Option<DateTime<Utc>>,
    /// Source URL or endpoint the record came from.
    pub source_url: Option<String>,
    /// Opaque attribute blob carried along for logging and audits.
    pub attributes: Option<JsonValue>,
}

/// An item as returned by the external public-procurement catalog search.
///
/// This is a superset of [`AcquisitionItem`]: it carries the ARP reference
/// and homologated quantity that the import pipeline does not persist, plus
/// identifiers in whatever inconsistent format the source used. Immutable
/// once fetched; mapped 1:1 into a draft item by
/// [`map_record`](crate::map_record).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawExternalRecord {
    /// Price-registration record (ARP / ata) number grouping line items
    /// under one tender.
    pub arp_number: String,
    /// CATMAT/CATSER classification code, raw.
    pub catalog_code: String,
    /// Full descriptive text, raw.
    pub full_description: String,
    /// Registered unit price, numeric or formatted text.
    pub unit_price: RawMoney,
    /// Tender identifier, raw (any of `"90.001/2025"`, `"90001/25"`, ...).
    pub procurement_number: String,
    /// Contracting-unit (UASG) code, raw.
    pub purchasing_unit_code: String,
    /// Quantity homologated under the ARP, when the source provides it.
    pub homologated_quantity: Option<f64>,
    /// Provenance metadata.
    #[serde(default)]
    pub metadata: RecordMetadata,
}
