//! Error taxonomy of the inspection workflow.

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::item::InspectionStatus;

/// Errors raised by the resolver and commit paths.
///
/// `Validation`, `UnresolvedItems`, and `InvalidTransition` are pure
/// precondition checks with no side effects on failure. `Persistence` is
/// raised after all learn calls have been joined; any single failure aborts
/// the commit with nothing handed off. `Enrichment` never propagates out of
/// the orchestrator: it is formatted into an item-level message.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Required user input was blank or otherwise unusable.
    #[error("validation failed: {0}")]
    Validation(String),
    /// A state transition the workflow does not permit was attempted.
    #[error("cannot mark an item as valid while it is {from}")]
    InvalidTransition {
        /// The status the item was in when the transition was attempted.
        from: InspectionStatus,
    },
    /// Commit attempted while items still require catalog information.
    #[error("{count} unresolved item(s) remain; resolve them before committing")]
    UnresolvedItems {
        /// How many items are still unresolved.
        count: usize,
        /// Catalog codes of the unresolved items, in batch order.
        catalog_codes: Vec<String>,
    },
    /// A learn-entry call failed during commit.
    #[error("failed to persist catalog entry {catalog_code}")]
    Persistence {
        /// Catalog code of the entry that failed to persist.
        catalog_code: String,
        #[source]
        source: GatewayError,
    },
    /// A single record's enrichment lookup failed. Item-level only.
    #[error("item {catalog_code} could not be enriched")]
    Enrichment {
        /// Catalog code of the record whose lookup failed.
        catalog_code: String,
        #[source]
        source: GatewayError,
    },
}
