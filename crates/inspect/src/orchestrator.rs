//! Concurrent inspection of a batch of selected external records.
//!
//! Each record runs its own pipeline: map → enrich (two parallel catalog
//! lookups) → classify against the pool of existing items. All records run
//! concurrently; the batch joins before anything is returned, so wall-clock
//! latency is bounded by the slowest single record instead of the sum.
//! A failure in one record's enrichment is downgraded to a message on that
//! item and never aborts its siblings.

use std::sync::Arc;
use std::time::Instant;

use ingest::{map_record, map_record_unchecked, AcquisitionItem, RawExternalRecord};
use matcher::find_duplicate;
use tracing::{debug, info, warn};

use crate::error::InspectError;
use crate::gateway::CatalogGateway;
use crate::item::{InspectionItem, InspectionStatus};

/// Maximum character count of the fallback short description derived from
/// the full description when the local catalog does not know the code.
pub const FALLBACK_SHORT_DESCRIPTION_CHARS: usize = 50;

/// Message attached to items that still need a local short description.
pub const NEEDS_INFO_MESSAGE: &str = "Requires a short description for the catalog.";

/// Inspects a batch of selected records against the union of the global and
/// local pools of existing items.
///
/// The output preserves the order of `selected`, not completion order. All
/// per-record pipelines are joined before this returns; partial results are
/// never surfaced.
pub async fn run_inspection(
    selected: Vec<RawExternalRecord>,
    existing_global: Vec<AcquisitionItem>,
    existing_local: Vec<AcquisitionItem>,
    gateway: Arc<dyn CatalogGateway>,
) -> Vec<InspectionItem> {
    let start = Instant::now();

    // Global and local items are checked as one pool, fetched once up front
    // and read-only for the rest of the run.
    let mut pool = existing_global;
    pool.extend(existing_local);
    let pool = Arc::new(pool);

    let mut handles = Vec::with_capacity(selected.len());
    for raw in selected {
        let gateway = Arc::clone(&gateway);
        let pool = Arc::clone(&pool);
        // Kept so a crashed task can still yield a degraded item in place.
        let fallback = raw.clone();
        handles.push((fallback, tokio::spawn(inspect_record(raw, pool, gateway))));
    }

    let mut items = Vec::with_capacity(handles.len());
    for (fallback, handle) in handles {
        match handle.await {
            Ok(item) => items.push(item),
            Err(join_err) => {
                warn!(arp = %fallback.arp_number, error = %join_err, "inspection task died");
                let draft = map_record_unchecked(&fallback);
                let mut item = InspectionItem::pending(fallback, draft);
                item.messages.push(format!("could not be enriched: {join_err}"));
                item.status = InspectionStatus::NeedsCatalogInfo;
                item.messages.push(NEEDS_INFO_MESSAGE.to_string());
                items.push(item);
            }
        }
    }

    info!(
        batch = items.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "inspection batch complete"
    );
    items
}

/// One record's sequential pipeline: map, enrich, classify.
async fn inspect_record(
    raw: RawExternalRecord,
    pool: Arc<Vec<AcquisitionItem>>,
    gateway: Arc<dyn CatalogGateway>,
) -> InspectionItem {
    let mut item = match map_record(&raw) {
        Ok(draft) => InspectionItem::pending(raw, draft),
        Err(err) => {
            // Junk record: keep it addressable, skip enrichment, but still
            // classify so an obvious duplicate is flagged as such.
            let draft = map_record_unchecked(&raw);
            let mut item = InspectionItem::pending(raw, draft);
            item.messages.push(format!("invalid external record: {err}"));
            return classify(item, &pool);
        }
    };

    enrich(&mut item, gateway.as_ref()).await;
    classify(item, &pool)
}

/// Runs both catalog lookups for one record in parallel and applies the
/// results. Lookup failures become item-level messages, never errors.
///
/// When no local short description exists, the fallback is truncated from
/// the external catalog's full description when that lookup found one, else
/// from the record's own full description.
async fn enrich(item: &mut InspectionItem, gateway: &dyn CatalogGateway) {
    let code = item.item.catalog_code.clone();

    let (external, local) = tokio::join!(
        gateway.fetch_external_description(&code),
        gateway.fetch_local_short_description(&code),
    );

    match external {
        Ok(found) => {
            item.full_external_description = found.full_description;
            item.category_name = found.category_name;
        }
        Err(source) => {
            let err = InspectError::Enrichment {
                catalog_code: code.clone(),
                source,
            };
            warn!(catalog_code = %code, error = %err, "external description lookup failed");
            item.messages.push(err.to_string());
        }
    }

    match local {
        Ok(Some(short)) if !short.trim().is_empty() => {
            item.item.short_description = short;
            item.catalog_cataloged = true;
        }
        Ok(_) => {
            debug!(catalog_code = %code, "code not yet in local catalog");
        }
        Err(source) => {
            let err = InspectError::Enrichment {
                catalog_code: code.clone(),
                source,
            };
            warn!(catalog_code = %code, error = %err, "local short-description lookup failed");
            item.messages.push(err.to_string());
        }
    }

    if !item.catalog_cataloged {
        let fallback = truncate_description(
            item.full_external_description
                .as_deref()
                .unwrap_or(&item.item.full_description),
            FALLBACK_SHORT_DESCRIPTION_CHARS,
        );
        item.item.short_description = fallback;
    }
}

/// Classifies one enriched item against the pool. First duplicate wins; the
/// explanation lists the matching item keys.
fn classify(mut item: InspectionItem, pool: &[AcquisitionItem]) -> InspectionItem {
    match find_duplicate(&item.item, pool) {
        Some((_existing, result)) => {
            item.status = InspectionStatus::Duplicate;
            item.messages
                .push(format!("Matching keys: {}", result.describe_keys()));
        }
        None if item.catalog_cataloged => {
            item.status = InspectionStatus::Valid;
        }
        None => {
            item.status = InspectionStatus::NeedsCatalogInfo;
            item.messages.push(NEEDS_INFO_MESSAGE.to_string());
        }
    }
    item
}

/// Truncates at a character boundary and appends an ellipsis marker when
/// something was actually cut.
fn truncate_description(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
