//! Immutable point-in-time views of the store.

use std::collections::HashMap;

use proxima_core::VectorId;

use crate::types::Vector;

/// An immutable point-in-time view of the store's records.
///
/// Snapshots are published atomically by [`IndexStore`](super::IndexStore)
/// and shared behind an `Arc`; once a reader holds one, it is complete and
/// never changes underneath them.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSnapshot {
    dimension: Option<usize>,
    records: HashMap<VectorId, Vector>,
}

impl IndexSnapshot {
    /// Create an empty snapshot, optionally with a pre-fixed dimension.
    #[must_use]
    pub(super) fn empty(dimension: Option<usize>) -> Self {
        Self { dimension, records: HashMap::new() }
    }

    /// Create a snapshot from its parts.
    #[must_use]
    pub(super) fn from_parts(dimension: Option<usize>, records: HashMap<VectorId, Vector>) -> Self {
        Self { dimension, records }
    }

    /// The fixed dimension of every vector in this snapshot, or `None`
    /// if no dimension has been fixed yet.
    #[inline]
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Number of records in this snapshot.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Check if the snapshot contains no records.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the vector stored under an id, if any.
    #[must_use]
    pub fn get(&self, id: VectorId) -> Option<&Vector> {
        self.records.get(&id)
    }

    /// Check whether an id is present.
    #[must_use]
    pub fn contains(&self, id: VectorId) -> bool {
        self.records.contains_key(&id)
    }

    /// Iterate over all `(id, vector)` pairs in the snapshot.
    ///
    /// Iteration order is unspecified; search sorts its own results.
    pub fn iter(&self) -> impl Iterator<Item = (VectorId, &Vector)> {
        self.records.iter().map(|(&id, vector)| (id, vector))
    }

    /// Clone the underlying record map, the starting point for building
    /// the next snapshot.
    #[must_use]
    pub(super) fn records_cloned(&self) -> HashMap<VectorId, Vector> {
        self.records.clone()
    }
}
