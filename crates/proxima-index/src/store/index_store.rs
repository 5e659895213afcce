//! The mutable vector store.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use proxima_core::VectorId;

use crate::error::IndexError;
use crate::types::VectorRecord;

use super::{BatchMode, BatchOutcome, IndexSnapshot};

/// The authoritative, concurrently-readable set of vectors.
///
/// The store enforces two structural invariants:
///
/// - **Dimension**: unset until the first record is accepted (or pre-fixed
///   via [`IndexStore::with_dimension`]), then fixed for the store's
///   lifetime. Any later record with a different length is rejected.
/// - **Id uniqueness**: no two records share an id at any observable
///   instant.
///
/// Reads ([`snapshot`](IndexStore::snapshot) and the accessors built on
/// it) are cheap and never block behind a batch being validated.
/// [`try_insert_batch`](IndexStore::try_insert_batch) builds the next
/// snapshot off to the side and publishes it in one pointer swap, so a
/// batch either fully applies or leaves the store exactly as it was.
///
/// The store does not serialize writers against each other; concurrent
/// mutation must go through
/// [`MutationCoordinator`](crate::coordinator::MutationCoordinator),
/// which holds the write lock across validate-and-publish.
#[derive(Debug)]
pub struct IndexStore {
    snapshot: RwLock<Arc<IndexSnapshot>>,
}

impl IndexStore {
    /// Create a new empty store with an unset dimension.
    ///
    /// The first accepted record fixes the dimension permanently.
    #[must_use]
    pub fn new() -> Self {
        Self { snapshot: RwLock::new(Arc::new(IndexSnapshot::empty(None))) }
    }

    /// Create a new empty store with the dimension fixed up front.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimension` is zero.
    pub fn with_dimension(dimension: usize) -> Result<Self, IndexError> {
        if dimension == 0 {
            return Err(IndexError::InvalidDimension { expected: 1, actual: 0 });
        }
        Ok(Self { snapshot: RwLock::new(Arc::new(IndexSnapshot::empty(Some(dimension)))) })
    }

    /// Get the current snapshot.
    ///
    /// Clones the published `Arc` under a short read lock; the returned
    /// snapshot is complete and immutable regardless of concurrent
    /// mutations.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::LockPoisoned`] if a prior panic corrupted
    /// the store.
    pub fn snapshot(&self) -> Result<Arc<IndexSnapshot>, IndexError> {
        let guard = self.snapshot.read().map_err(|_| IndexError::LockPoisoned)?;
        Ok(Arc::clone(&guard))
    }

    /// The store's fixed dimension, or `None` if not yet fixed.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::LockPoisoned`] if a prior panic corrupted
    /// the store.
    pub fn dimension(&self) -> Result<Option<usize>, IndexError> {
        Ok(self.snapshot()?.dimension())
    }

    /// Number of records currently stored.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::LockPoisoned`] if a prior panic corrupted
    /// the store.
    pub fn count(&self) -> Result<usize, IndexError> {
        Ok(self.snapshot()?.count())
    }

    /// Check if the store contains no records.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::LockPoisoned`] if a prior panic corrupted
    /// the store.
    pub fn is_empty(&self) -> Result<bool, IndexError> {
        Ok(self.snapshot()?.is_empty())
    }

    /// Validate and apply a batch of records as one atomic step.
    ///
    /// An empty batch is a no-op success with zero counts.
    ///
    /// If the store's dimension is unset, the first record in the batch
    /// fixes it; the fix only takes effect if the whole batch succeeds.
    ///
    /// In [`BatchMode::InsertOnly`] every id must be new, both with
    /// respect to the store and within the batch itself. In
    /// [`BatchMode::Upsert`] existing ids are overwritten; an id repeated
    /// within one batch applies last-writer-wins and is counted once.
    ///
    /// Callers mutating concurrently must serialize through
    /// [`MutationCoordinator`](crate::coordinator::MutationCoordinator);
    /// the store itself only guarantees that readers never observe a
    /// partially-applied batch.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DimensionMismatch`] if any record disagrees
    /// with the fixed (or about-to-be-fixed) dimension,
    /// [`IndexError::DuplicateId`] for an id collision in insert-only
    /// mode, or [`IndexError::LockPoisoned`] if a prior panic corrupted
    /// the store. On any error, no record in the batch is applied.
    pub fn try_insert_batch(
        &self,
        records: Vec<VectorRecord>,
        mode: BatchMode,
    ) -> Result<BatchOutcome, IndexError> {
        if records.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let current = self.snapshot()?;
        let mut dimension = current.dimension();
        let mut next = current.records_cloned();

        // Ids counted once per batch, even if upsert repeats one.
        let mut inserted_ids: HashSet<VectorId> = HashSet::new();
        let mut replaced_ids: HashSet<VectorId> = HashSet::new();

        for record in records {
            let actual = record.dimension();
            match dimension {
                Some(expected) if actual != expected => {
                    return Err(IndexError::DimensionMismatch { expected, actual });
                }
                Some(_) => {}
                // First record ever accepted fixes the dimension.
                None => dimension = Some(actual),
            }

            let (id, vector) = record.into_parts();
            match mode {
                BatchMode::InsertOnly => {
                    if next.contains_key(&id) {
                        return Err(IndexError::DuplicateId(id));
                    }
                    next.insert(id, vector);
                    inserted_ids.insert(id);
                }
                BatchMode::Upsert => {
                    if current.contains(id) {
                        replaced_ids.insert(id);
                    } else {
                        inserted_ids.insert(id);
                    }
                    next.insert(id, vector);
                }
            }
        }

        let outcome = BatchOutcome::new(inserted_ids.len(), replaced_ids.len());
        let published = Arc::new(IndexSnapshot::from_parts(dimension, next));

        let mut guard = self.snapshot.write().map_err(|_| IndexError::LockPoisoned)?;
        *guard = published;

        Ok(outcome)
    }
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new()
    }
}
