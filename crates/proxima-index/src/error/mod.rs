//! Error types for the index crate.

use thiserror::Error;

use proxima_core::VectorId;

/// Errors that can occur in index operations.
///
/// Every variant is a request-validation error: it is detected before any
/// mutation is applied and is recoverable by the caller. The only
/// exception is [`IndexError::LockPoisoned`], which indicates a prior
/// panic corrupted the store.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Dimension mismatch between a vector and the index's fixed dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The expected dimension.
        expected: usize,
        /// The actual dimension.
        actual: usize,
    },

    /// Invalid dimension (e.g., zero).
    #[error("invalid dimension: expected at least {expected}, got {actual}")]
    InvalidDimension {
        /// The minimum expected dimension.
        expected: usize,
        /// The actual dimension.
        actual: usize,
    },

    /// Invalid value in a vector (NaN, Infinity).
    #[error("invalid value at index {index}: {value} - {reason}")]
    InvalidValue {
        /// The index of the invalid value.
        index: usize,
        /// The invalid value.
        value: f32,
        /// The reason the value is invalid.
        reason: &'static str,
    },

    /// An insert-only batch contains an id that is already present.
    #[error("duplicate vector id: {0}")]
    DuplicateId(VectorId),

    /// Invalid neighbor count for a search.
    #[error("invalid k: {0} (k must be positive)")]
    InvalidK(usize),

    /// The query vector has no coordinates.
    #[error("query vector is empty")]
    EmptyQuery,

    /// Lock poisoned - indicates a concurrent panic corrupted the store.
    ///
    /// This error is unrecoverable - the index must be dropped and recreated.
    #[error("index corrupted: lock poisoned due to prior panic in another thread")]
    LockPoisoned,
}
