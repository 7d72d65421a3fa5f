//! Acquisition-item ingest layer.
//!
//! This is where external procurement data enters the pipeline. We take a
//! raw search result exactly as the external catalog returned it, validate
//! the fields the rest of the pipeline depends on, and produce a draft
//! [`AcquisitionItem`] that the matcher and inspection stages can work with.
//!
//! ## What we do here
//!
//! - **Map 1:1** - every field of the raw record is copied into the draft;
//!   nothing is invented. The short description is deliberately left empty:
//!   the inspection orchestrator resolves it from the local catalog.
//! - **Resolve prices** - raw prices arrive numeric or as formatted text;
//!   both go through the lenient money parser.
//! - **Validate** - a blank full description or a negative price is rejected
//!   with a typed [`IngestError`].
//! - **Generate ids** - drafts get a locally generated UUIDv4 so they are
//!   addressable before anything is persisted.
//!
//! ## Example
//!
//! ```
//! use ingest::{map_record, RawExternalRecord, RawMoney, RecordMetadata};
//!
//! let raw = RawExternalRecord {
//!     arp_number: "ARP 12/2024".into(),
//!     catalog_code: "423465".into(),
//!     full_description: "Caneta esferográfica azul".into(),
//!     unit_price: RawMoney::from("35,00"),
//!     procurement_number: "90.001/24".into(),
//!     purchasing_unit_code: "160001".into(),
//!     homologated_quantity: Some(500.0),
//!     metadata: RecordMetadata::default(),
//! };
//!
//! let draft = map_record(&raw).unwrap();
//! assert_eq!(draft.unit_price, 35.0);
//! assert!(draft.short_description.is_empty());
//! ```

mod error;
mod types;

pub use crate::error::IngestError;
pub use crate::types::{AcquisitionItem, RawExternalRecord, RawMoney, RecordMetadata};

use tracing::warn;
use uuid::Uuid;

/// Maps a raw external record 1:1 into a draft [`AcquisitionItem`].
///
/// The draft gets a fresh local id and an empty short description. Fails
/// with [`IngestError::MissingDescription`] when the full description is
/// blank and [`IngestError::NegativePrice`] when the resolved price is
/// below zero.
pub fn map_record(raw: &RawExternalRecord) -> Result<AcquisitionItem, IngestError> {
    if raw.full_description.trim().is_empty() {
        warn!(arp = %raw.arp_number, "rejecting external record without description");
        return Err(IngestError::MissingDescription);
    }

    let unit_price = raw.unit_price.amount();
    if unit_price < 0.0 {
        warn!(
            arp = %raw.arp_number,
            catalog_code = %raw.catalog_code,
            unit_price,
            "rejecting external record with negative price"
        );
        return Err(IngestError::NegativePrice(unit_price));
    }

    Ok(map_record_unchecked(raw))
}

/// Best-effort draft mapping with no validation.
///
/// Used when a record has already failed [`map_record`] but the pipeline
/// still needs an addressable item to carry the error message through the
/// inspection workflow. Negative prices are clamped to zero so the item
/// invariant holds even for junk input.
pub fn map_record_unchecked(raw: &RawExternalRecord) -> AcquisitionItem {
    AcquisitionItem {
        id: Uuid::new_v4().to_string(),
        full_description: raw.full_description.clone(),
        short_description: String::new(),
        unit_price: raw.unit_price.amount().max(0.0),
        procurement_number: raw.procurement_number.clone(),
        purchasing_unit_code: raw.purchasing_unit_code.clone(),
        catalog_code: raw.catalog_code.clone(),
    }
}
