//! Manual resolution and final commit of an inspected batch.
//!
//! The resolver is the human side of the workflow: it groups items by
//! status for display, promotes `NeedsCatalogInfo` items once the user has
//! supplied a short description, and performs the final commit: persisting
//! newly learned catalog entries and handing off the validated items.

use std::sync::Arc;

use ingest::AcquisitionItem;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::InspectError;
use crate::gateway::{CatalogGateway, GatewayError};
use crate::item::{InspectionItem, InspectionStatus};

/// Promotes a `NeedsCatalogInfo` item to `Valid` with a user-supplied short
/// description.
///
/// This is the only manual transition the state machine permits. Blank input
/// fails with [`InspectError::Validation`]; any status other than
/// `NeedsCatalogInfo` fails with [`InspectError::InvalidTransition`]. In
/// particular, a `Duplicate` item cannot be promoted here and must be
/// reviewed outside the pipeline.
pub fn resolve_needs_info(
    mut item: InspectionItem,
    user_short_description: &str,
) -> Result<InspectionItem, InspectError> {
    if item.status != InspectionStatus::NeedsCatalogInfo {
        return Err(InspectError::InvalidTransition { from: item.status });
    }

    let trimmed = user_short_description.trim();
    if trimmed.is_empty() {
        return Err(InspectError::Validation(
            "short description must not be blank".into(),
        ));
    }

    item.user_short_description = trimmed.to_string();
    item.item.short_description = trimmed.to_string();
    item.status = InspectionStatus::Valid;
    Ok(item)
}

/// Items partitioned by current status, for display.
#[derive(Debug, Default)]
pub struct StatusGroups<'a> {
    pub pending: Vec<&'a InspectionItem>,
    pub valid: Vec<&'a InspectionItem>,
    pub needs_catalog_info: Vec<&'a InspectionItem>,
    pub duplicate: Vec<&'a InspectionItem>,
}

/// Partitions a batch by status, preserving batch order within each group.
pub fn group_by_status(items: &[InspectionItem]) -> StatusGroups<'_> {
    let mut groups = StatusGroups::default();
    for item in items {
        match item.status {
            InspectionStatus::Pending => groups.pending.push(item),
            InspectionStatus::Valid => groups.valid.push(item),
            InspectionStatus::NeedsCatalogInfo => groups.needs_catalog_info.push(item),
            InspectionStatus::Duplicate => groups.duplicate.push(item),
        }
    }
    groups
}

/// The view a resolution dialog opens on: `NeedsCatalogInfo` when anything
/// still requires attention, else `Valid`.
pub fn default_view(groups: &StatusGroups<'_>) -> InspectionStatus {
    if groups.needs_catalog_info.is_empty() {
        InspectionStatus::Valid
    } else {
        InspectionStatus::NeedsCatalogInfo
    }
}

/// A code/description pair newly taught to the local reference catalog
/// during commit. Surfaced so downstream caches can invalidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LearnedEntry {
    pub catalog_code: String,
    pub short_description: String,
}

/// Result of a successful commit.
#[derive(Debug, Clone, Default)]
pub struct CommitOutcome {
    /// The validated items handed off to the caller, in batch order.
    /// `Duplicate` items are never included.
    pub imported: Vec<AcquisitionItem>,
    /// Catalog entries newly persisted by this commit.
    pub learned: Vec<LearnedEntry>,
}

impl CommitOutcome {
    pub fn learned_count(&self) -> usize {
        self.learned.len()
    }
}

/// Commits an inspected batch.
///
/// Preconditions: no item may remain in `NeedsCatalogInfo` (or `Pending`),
/// else [`InspectError::UnresolvedItems`] is returned with no side effects.
///
/// For every `Valid` item whose code the local catalog did not already
/// know, a learn-entry call is issued. The calls run concurrently and are
/// all joined before the outcome is decided; any failure aborts the whole
/// commit with [`InspectError::Persistence`] naming the failing catalog
/// code, and no items are handed off.
///
/// The input slice is left untouched; on success the caller discards its
/// batch and uses [`CommitOutcome::imported`].
pub async fn commit(
    items: &[InspectionItem],
    gateway: Arc<dyn CatalogGateway>,
) -> Result<CommitOutcome, InspectError> {
    let unresolved: Vec<String> = items
        .iter()
        .filter(|item| {
            matches!(
                item.status,
                InspectionStatus::NeedsCatalogInfo | InspectionStatus::Pending
            )
        })
        .map(|item| item.item.catalog_code.clone())
        .collect();
    if !unresolved.is_empty() {
        return Err(InspectError::UnresolvedItems {
            count: unresolved.len(),
            catalog_codes: unresolved,
        });
    }

    let mut handles = Vec::new();
    for item in items {
        if item.status != InspectionStatus::Valid || item.catalog_cataloged {
            continue;
        }
        let gateway = Arc::clone(&gateway);
        let catalog_code = item.item.catalog_code.clone();
        let full_description = item.item.full_description.clone();
        let short_description = item.item.short_description.clone();
        let tracked_code = catalog_code.clone();
        handles.push((
            tracked_code,
            tokio::spawn(async move {
                match gateway
                    .learn_entry(&catalog_code, &full_description, &short_description)
                    .await
                {
                    Ok(()) => Ok(LearnedEntry {
                        catalog_code,
                        short_description,
                    }),
                    Err(source) => Err((catalog_code, source)),
                }
            }),
        ));
    }

    // Every call is joined before the outcome is decided; the first failure
    // is reported after the join.
    let mut learned = Vec::with_capacity(handles.len());
    let mut first_failure: Option<(String, GatewayError)> = None;
    for (tracked_code, handle) in handles {
        match handle.await {
            Ok(Ok(entry)) => learned.push(entry),
            Ok(Err(failure)) => {
                if first_failure.is_none() {
                    first_failure = Some(failure);
                }
            }
            Err(join_err) => {
                if first_failure.is_none() {
                    first_failure =
                        Some((tracked_code, GatewayError::Persistence(join_err.to_string())));
                }
            }
        }
    }

    if let Some((catalog_code, source)) = first_failure {
        warn!(catalog_code = %catalog_code, error = %source, "commit aborted");
        return Err(InspectError::Persistence {
            catalog_code,
            source,
        });
    }

    let imported: Vec<AcquisitionItem> = items
        .iter()
        .filter(|item| item.status == InspectionStatus::Valid)
        .map(|item| item.item.clone())
        .collect();

    info!(
        imported = imported.len(),
        learned = learned.len(),
        "commit complete"
    );
    Ok(CommitOutcome { imported, learned })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::InspectionItem;
    use crate::stub::StubCatalog;
    use ingest::{RawExternalRecord, RawMoney, RecordMetadata};

    fn inspected(catalog_code: &str, status: InspectionStatus, cataloged: bool) -> InspectionItem {
        let original = RawExternalRecord {
            arp_number: "ARP 3/2024".into(),
            catalog_code: catalog_code.into(),
            full_description: "Caneta azul".into(),
            unit_price: RawMoney::Number(35.0),
            procurement_number: "90.001/24".into(),
            purchasing_unit_code: "160001".into(),
            homologated_quantity: None,
            metadata: RecordMetadata::default(),
        };
        let mut draft = ingest::map_record(&original).unwrap();
        draft.short_description = "Caneta".into();
        let mut item = InspectionItem::pending(original, draft);
        item.status = status;
        item.catalog_cataloged = cataloged;
        item
    }

    #[test]
    fn resolve_promotes_with_non_blank_text() {
        let item = inspected("423465", InspectionStatus::NeedsCatalogInfo, false);
        let resolved = resolve_needs_info(item, "  Caneta azul  ").unwrap();

        assert_eq!(resolved.status, InspectionStatus::Valid);
        assert_eq!(resolved.item.short_description, "Caneta azul");
        assert_eq!(resolved.user_short_description, "Caneta azul");
    }

    #[test]
    fn resolve_rejects_blank_text() {
        let item = inspected("423465", InspectionStatus::NeedsCatalogInfo, false);
        let err = resolve_needs_info(item, "   ").unwrap_err();
        assert!(matches!(err, InspectError::Validation(_)));
    }

    #[test]
    fn resolve_rejects_duplicate_items() {
        let item = inspected("423465", InspectionStatus::Duplicate, false);
        let err = resolve_needs_info(item, "Caneta").unwrap_err();
        assert!(matches!(
            err,
            InspectError::InvalidTransition {
                from: InspectionStatus::Duplicate
            }
        ));
    }

    #[test]
    fn resolve_rejects_already_valid_items() {
        let item = inspected("423465", InspectionStatus::Valid, true);
        let err = resolve_needs_info(item, "Caneta").unwrap_err();
        assert!(matches!(err, InspectError::InvalidTransition { .. }));
    }

    #[test]
    fn grouping_partitions_and_default_view_prefers_needs_info() {
        let items = vec![
            inspected("1", InspectionStatus::Valid, true),
            inspected("2", InspectionStatus::NeedsCatalogInfo, false),
            inspected("3", InspectionStatus::Duplicate, false),
        ];
        let groups = group_by_status(&items);
        assert_eq!(groups.valid.len(), 1);
        assert_eq!(groups.needs_catalog_info.len(), 1);
        assert_eq!(groups.duplicate.len(), 1);
        assert_eq!(default_view(&groups), InspectionStatus::NeedsCatalogInfo);

        let resolved = vec![inspected("1", InspectionStatus::Valid, true)];
        assert_eq!(default_view(&group_by_status(&resolved)), InspectionStatus::Valid);
    }

    #[tokio::test]
    async fn commit_refuses_unresolved_items() {
        let gateway = Arc::new(StubCatalog::new());
        let items = vec![
            inspected("1", InspectionStatus::Valid, true),
            inspected("2", InspectionStatus::NeedsCatalogInfo, false),
        ];

        let err = commit(&items, gateway.clone()).await.unwrap_err();
        match err {
            InspectError::UnresolvedItems {
                count,
                catalog_codes,
            } => {
                assert_eq!(count, 1);
                assert_eq!(catalog_codes, vec!["2".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Precondition failure has no side effects.
        assert!(gateway.learned_entries().is_empty());
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn commit_learns_uncataloged_entries_only() {
        let gateway = Arc::new(StubCatalog::new());
        let items = vec![
            inspected("1", InspectionStatus::Valid, true),
            inspected("2", InspectionStatus::Valid, false),
            inspected("3", InspectionStatus::Duplicate, false),
        ];

        let outcome = commit(&items, gateway.clone()).await.unwrap();

        assert_eq!(outcome.imported.len(), 2);
        assert_eq!(outcome.learned_count(), 1);
        assert_eq!(outcome.learned[0].catalog_code, "2");
        assert_eq!(gateway.learned_entries().len(), 1);
    }

    #[tokio::test]
    async fn commit_excludes_duplicates_from_output() {
        let gateway = Arc::new(StubCatalog::new());
        let items = vec![
            inspected("1", InspectionStatus::Valid, true),
            inspected("3", InspectionStatus::Duplicate, false),
        ];

        let outcome = commit(&items, gateway).await.unwrap();
        assert_eq!(outcome.imported.len(), 1);
        assert_eq!(outcome.imported[0].catalog_code, "1");
    }

    #[tokio::test]
    async fn commit_aborts_on_any_persistence_failure() {
        let gateway = Arc::new(StubCatalog::new().failing_learn("2"));
        let items = vec![
            inspected("1", InspectionStatus::Valid, false),
            inspected("2", InspectionStatus::Valid, false),
        ];

        let err = commit(&items, gateway).await.unwrap_err();
        match err {
            InspectError::Persistence { catalog_code, .. } => assert_eq!(catalog_code, "2"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
