//! Gateway traits at the boundary of the inspection core.
//!
//! The pipeline never talks to HTTP or a database directly: it consumes
//! these traits, and the host application plugs in its transport. The crate
//! ships deterministic in-memory implementations in [`crate::stub`] for
//! tests and demos.

use async_trait::async_trait;
use ingest::AcquisitionItem;
use thiserror::Error;

/// Errors surfaced by gateway implementations.
///
/// The inspection core does not interpret these beyond their category: a
/// lookup failure during enrichment is downgraded to an item-level message,
/// a persistence failure during commit aborts the whole commit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// A read against the external or local catalog failed.
    #[error("catalog lookup failed: {0}")]
    Lookup(String),
    /// Writing a learned catalog entry failed.
    #[error("catalog persistence failed: {0}")]
    Persistence(String),
    /// Fetching the pool of existing items failed.
    #[error("existing-items fetch failed: {0}")]
    ExistingItems(String),
}

/// Description data the external catalog holds for a catalog code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalDescription {
    /// Full descriptive text, when the external catalog knows the code.
    pub full_description: Option<String>,
    /// PDM category name associated with the code.
    pub category_name: Option<String>,
}

/// Resolves catalog codes to descriptions and learns new code/description
/// pairs.
///
/// Reads are idempotent; the write path ([`learn_entry`](Self::learn_entry))
/// is only invoked at commit time, never during classification.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Looks up the full description and PDM category name in the external
    /// catalog.
    async fn fetch_external_description(
        &self,
        catalog_code: &str,
    ) -> Result<ExternalDescription, GatewayError>;

    /// Looks up the short description in the local reference catalog.
    /// `Ok(None)` means the code is not yet cataloged locally.
    async fn fetch_local_short_description(
        &self,
        catalog_code: &str,
    ) -> Result<Option<String>, GatewayError>;

    /// Persists a newly learned code/description pair into the local
    /// reference catalog.
    async fn learn_entry(
        &self,
        catalog_code: &str,
        full_description: &str,
        short_description: &str,
    ) -> Result<(), GatewayError>;
}

/// Supplies the pool of already-registered acquisition items to compare
/// against. Fetched once up front per inspection run, read-only for the
/// duration of the run.
#[async_trait]
pub trait ExistingItemsProvider: Send + Sync {
    /// Returns every item registered under `owner_id` for the given
    /// reference year.
    async fn fetch_all_existing(
        &self,
        reference_year: i32,
        owner_id: &str,
    ) -> Result<Vec<AcquisitionItem>, GatewayError>;
}
