//! Workspace umbrella crate for the acquisition-item import pipeline.
//!
//! This crate stitches together normalization, mapping, duplicate matching,
//! and the inspection workflow so callers can drive one import session with
//! a single API entry point. The individual stages live in their own
//! crates and are re-exported here.
//!
//! A [`Session`] owns the batch of inspection items for the duration of one
//! import: run the inspection, let the user resolve anything that needs a
//! short description, then commit. The batch is discarded after commit or
//! [`Session::cancel`]; there is no cross-session identity.

pub use ingest::{
    map_record, map_record_unchecked, AcquisitionItem, IngestError, RawExternalRecord, RawMoney,
    RecordMetadata,
};
pub use inspect::{
    commit, default_view, group_by_status, resolve_needs_info, run_inspection, CatalogGateway,
    CommitOutcome, ExistingItemsProvider, ExternalDescription, GatewayError, InspectError,
    InspectionItem, InspectionStatus, LearnedEntry, StatusGroups, NEEDS_INFO_MESSAGE,
};
pub use matcher::{find_duplicate, is_flexible_duplicate, DuplicateCheckResult, MatchKey};
pub use normalize::{
    cents, normalize_digits, normalize_procurement_number, normalize_text, parse_money,
};

pub use inspect::stub;

use std::sync::Arc;
use tracing::info;

/// One import session: the pool of existing items plus the batch of items
/// currently under inspection.
///
/// The pre-selected external records are threaded through explicitly;
/// there is no ambient global selection state. The existing-items pool is
/// fetched once when the session opens and stays read-only for the whole
/// run.
pub struct Session {
    gateway: Arc<dyn CatalogGateway>,
    existing_global: Vec<AcquisitionItem>,
    existing_local: Vec<AcquisitionItem>,
    items: Vec<InspectionItem>,
}

impl Session {
    /// Builds a session over an already-fetched pool of existing items.
    pub fn new(
        gateway: Arc<dyn CatalogGateway>,
        existing_global: Vec<AcquisitionItem>,
        existing_local: Vec<AcquisitionItem>,
    ) -> Self {
        Self {
            gateway,
            existing_global,
            existing_local,
            items: Vec::new(),
        }
    }

    /// Opens a session by fetching the global pool from the provider, once,
    /// up front. `existing_local` is whatever the destination record
    /// already stages locally.
    pub async fn open(
        gateway: Arc<dyn CatalogGateway>,
        provider: &dyn ExistingItemsProvider,
        reference_year: i32,
        owner_id: &str,
        existing_local: Vec<AcquisitionItem>,
    ) -> Result<Self, GatewayError> {
        let existing_global = provider.fetch_all_existing(reference_year, owner_id).await?;
        info!(
            reference_year,
            owner_id,
            pool = existing_global.len(),
            "import session opened"
        );
        Ok(Self::new(gateway, existing_global, existing_local))
    }

    /// Runs the concurrent inspection over the selected records, replacing
    /// any batch from a previous run.
    pub async fn inspect(&mut self, selected: Vec<RawExternalRecord>) -> &[InspectionItem] {
        self.items = run_inspection(
            selected,
            self.existing_global.clone(),
            self.existing_local.clone(),
            Arc::clone(&self.gateway),
        )
        .await;
        &self.items
    }

    /// The batch currently under inspection.
    pub fn items(&self) -> &[InspectionItem] {
        &self.items
    }

    /// The batch partitioned by status, for display.
    pub fn groups(&self) -> StatusGroups<'_> {
        group_by_status(&self.items)
    }

    /// Resolves the item at `index` with a user-supplied short description.
    pub fn resolve(&mut self, index: usize, short_description: &str) -> Result<&InspectionItem, InspectError> {
        let item = self
            .items
            .get(index)
            .cloned()
            .ok_or_else(|| InspectError::Validation(format!("no inspection item at index {index}")))?;
        let resolved = resolve_needs_info(item, short_description)?;
        self.items[index] = resolved;
        Ok(&self.items[index])
    }

    /// Commits the batch. On success the batch is consumed and the outcome
    /// returned; on failure the batch is left untouched for another
    /// attempt.
    pub async fn commit(&mut self) -> Result<CommitOutcome, InspectError> {
        let outcome = commit(&self.items, Arc::clone(&self.gateway)).await?;
        self.items.clear();
        Ok(outcome)
    }

    /// Discards the batch without committing, as when the user dismisses
    /// the inspection dialog. In-flight lookups from an abandoned
    /// inspection are idempotent reads and simply complete unobserved.
    pub fn cancel(&mut self) {
        self.items.clear();
    }
}
