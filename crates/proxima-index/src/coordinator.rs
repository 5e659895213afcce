//! Serialization of batched mutations.
//!
//! The store publishes immutable snapshots, so readers never need
//! coordination; writers do. [`MutationCoordinator`] is the single gate
//! every Insert/Upsert batch passes through: it holds one mutex across
//! validate-build-publish so two batches can never interleave, and a
//! batch either fully applies or leaves the store exactly as it was.

use std::sync::{Arc, Mutex};

use crate::error::IndexError;
use crate::store::{BatchMode, BatchOutcome, IndexStore};
use crate::types::VectorRecord;

/// Serializes Insert/Upsert batches against one [`IndexStore`].
///
/// Reads do not take this lock; they clone the store's published
/// snapshot and proceed concurrently with any in-flight write. A write
/// holds the lock for the duration of one batch (validation plus the
/// snapshot swap) and releases it on every exit path.
///
/// The coordinator never retries: a validation failure is terminal for
/// that call and is surfaced to the caller unchanged.
#[derive(Debug)]
pub struct MutationCoordinator {
    store: Arc<IndexStore>,
    write_lock: Mutex<()>,
}

impl MutationCoordinator {
    /// Create a coordinator for the given store.
    ///
    /// All mutations of the store must go through this coordinator; the
    /// store itself does not serialize writers.
    #[must_use]
    pub fn new(store: Arc<IndexStore>) -> Self {
        Self { store, write_lock: Mutex::new(()) }
    }

    /// Get the coordinated store.
    #[must_use]
    pub fn store(&self) -> &Arc<IndexStore> {
        &self.store
    }

    /// Apply one batch atomically.
    ///
    /// Acquires the write lock, delegates to
    /// [`IndexStore::try_insert_batch`], and releases the lock on both
    /// the success and failure paths (RAII guard).
    ///
    /// # Errors
    ///
    /// Propagates validation errors from the store unchanged; returns
    /// [`IndexError::LockPoisoned`] if a prior panic corrupted the lock.
    pub fn apply(
        &self,
        records: Vec<VectorRecord>,
        mode: BatchMode,
    ) -> Result<BatchOutcome, IndexError> {
        let _guard = self.write_lock.lock().map_err(|_| IndexError::LockPoisoned)?;
        self.store.try_insert_batch(records, mode)
    }
}
