//! The authoritative vector store.
//!
//! This module provides:
//!
//! - [`IndexSnapshot`] - An immutable point-in-time view of the store
//! - [`IndexStore`] - The mutable store, publishing snapshots atomically
//! - [`BatchMode`] / [`BatchOutcome`] - How a batch applies and what it did
//!
//! # Snapshot discipline
//!
//! The store keeps its records behind an `Arc`-swapped snapshot: readers
//! clone the current `Arc` under a short read lock and then operate
//! lock-free, while a successful mutation builds the *next* snapshot and
//! publishes it in one atomic pointer swap. A reader therefore observes
//! either the pre-batch or the post-batch state of any mutation, never a
//! partially-applied batch.

mod index_store;
mod snapshot;


pub use index_store::IndexStore;
pub use snapshot::IndexSnapshot;

use serde::{Deserialize, Serialize};

/// How a batch of records is applied to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchMode {
    /// Every id in the batch must be new; any collision fails the whole
    /// batch and nothing is applied.
    InsertOnly,
    /// Existing ids are overwritten in place, new ids are added; id
    /// collisions never fail the batch.
    Upsert,
}

/// Counts reported by a successfully applied batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Number of records added under a new id.
    pub inserted: usize,
    /// Number of records that overwrote an existing id. Always zero for
    /// [`BatchMode::InsertOnly`].
    pub replaced: usize,
}

impl BatchOutcome {
    /// Create a new outcome.
    #[must_use]
    pub const fn new(inserted: usize, replaced: usize) -> Self {
        Self { inserted, replaced }
    }
}
