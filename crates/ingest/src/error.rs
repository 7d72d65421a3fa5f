//! Error types produced by the ingest crate.
//!
//! All errors are typed, cloneable, and comparable so callers can handle
//! specific cases, map them to user-facing messages, and assert on them in
//! tests.

use thiserror::Error;

/// Errors raised while mapping a raw external record into a draft item.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    /// The record carries no usable full description.
    #[error("external record has no full description")]
    MissingDescription,
    /// The resolved unit price is negative; registered prices are never
    /// below zero.
    #[error("external record has a negative unit price: {0}")]
    NegativePrice(f64),
}
