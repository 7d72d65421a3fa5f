//! Inspection workflow for imported acquisition items.
//!
//! This crate is the orchestration heart of the import pipeline. A user has
//! searched the external procurement catalog and selected a handful of raw
//! records; this crate enriches each one (two concurrent catalog lookups per
//! record), classifies it against everything already registered, stages
//! ambiguous items for manual resolution, and commits only vetted items,
//! optionally teaching the local reference catalog a new code/description
//! pair on the way out.
//!
//! ## Lifecycle
//!
//! ```text
//! selected records
//!     │ run_inspection (concurrent fan-out, joined batch)
//!     ▼
//! InspectionItem: Valid | NeedsCatalogInfo | Duplicate
//!     │ resolve_needs_info (user supplies short description)
//!     ▼
//! commit → CommitOutcome { imported, learned }
//! ```
//!
//! ## Boundaries
//!
//! All I/O goes through the [`CatalogGateway`] and [`ExistingItemsProvider`]
//! traits; the crate owns no transport, no storage, and no UI. The
//! [`stub`] module provides deterministic in-memory implementations.
//!
//! ## Concurrency model
//!
//! Cooperative async with no shared-memory mutation: each item is owned by
//! exactly one in-flight task until it is written into the batch at join
//! time. Dropping the batch before commit abandons any in-flight lookups;
//! they are idempotent reads, so nothing needs hard cancellation.

mod error;
pub mod gateway;
mod item;
mod orchestrator;
mod resolver;
pub mod stub;

pub use crate::error::InspectError;
pub use crate::gateway::{
    CatalogGateway, ExistingItemsProvider, ExternalDescription, GatewayError,
};
pub use crate::item::{InspectionItem, InspectionStatus};
pub use crate::orchestrator::{
    run_inspection, FALLBACK_SHORT_DESCRIPTION_CHARS, NEEDS_INFO_MESSAGE,
};
pub use crate::resolver::{
    commit, default_view, group_by_status, resolve_needs_info, CommitOutcome, LearnedEntry,
    StatusGroups,
};
