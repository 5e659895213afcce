//! Exact k-nearest-neighbor operator.
//!
//! Performs brute-force k-NN search by computing the distance from the
//! query to every record in a snapshot.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use proxima_core::{Neighbor, VectorId};

use crate::distance::DistanceMetric;
use crate::error::IndexError;
use crate::store::IndexSnapshot;

/// Exact k-NN search using brute force.
///
/// Computes the distance to every vector in the snapshot and keeps the k
/// nearest. Results are ordered by ascending distance with ties broken by
/// ascending id, so the same snapshot and query always produce the same
/// result sequence.
///
/// # Complexity
///
/// O(n·d + n log k) where n is the record count and d the dimension.
///
/// # Example
///
/// ```
/// use proxima_index::distance::DistanceMetric;
/// use proxima_index::ops::ExactKnn;
/// use proxima_index::store::{BatchMode, IndexStore};
/// use proxima_index::types::VectorRecord;
///
/// let store = IndexStore::new();
/// store
///     .try_insert_batch(
///         vec![
///             VectorRecord::new(1, vec![1.0]).unwrap(),
///             VectorRecord::new(2, vec![2.0]).unwrap(),
///         ],
///         BatchMode::InsertOnly,
///     )
///     .unwrap();
///
/// let snapshot = store.snapshot().unwrap();
/// let knn = ExactKnn::new(&snapshot, &[1.0], DistanceMetric::SquaredEuclidean, 5).unwrap();
/// assert_eq!(knn.len(), 2);
/// ```
#[derive(Debug)]
pub struct ExactKnn {
    /// Results sorted ascending by `(distance, id)`.
    results: Vec<Neighbor>,
}

/// Wrapper for max-heap comparison (we want the smallest pairs kept).
#[derive(Debug)]
struct MaxHeapEntry {
    id: VectorId,
    distance: f32,
}

impl MaxHeapEntry {
    fn key(&self, other: &Self) -> Ordering {
        // NaN distances cannot arise from validated vectors; treat them as
        // equal so the heap keeps a total order regardless.
        self.distance
            .partial_cmp(&other.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialEq for MaxHeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key(other) == Ordering::Equal
    }
}

impl Eq for MaxHeapEntry {}

impl PartialOrd for MaxHeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MaxHeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: the lexicographically largest (distance, id) pair sits
        // on top, ready to be evicted by a closer candidate.
        self.key(other)
    }
}

impl ExactKnn {
    /// Run an exact k-NN search over a snapshot.
    ///
    /// An empty or never-dimensioned snapshot yields an empty result for
    /// any k: there is nothing to match against, and no fixed dimension
    /// exists to validate the query length.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidK`] if `k` is zero, or
    /// [`IndexError::DimensionMismatch`] if the query length disagrees
    /// with the snapshot's fixed dimension.
    pub fn new(
        snapshot: &IndexSnapshot,
        query: &[f32],
        metric: DistanceMetric,
        k: usize,
    ) -> Result<Self, IndexError> {
        if k == 0 {
            return Err(IndexError::InvalidK(k));
        }

        let Some(dimension) = snapshot.dimension() else {
            return Ok(Self { results: Vec::new() });
        };

        if query.len() != dimension {
            return Err(IndexError::DimensionMismatch {
                expected: dimension,
                actual: query.len(),
            });
        }

        // Bounded max-heap keeps the k smallest (distance, id) pairs.
        // saturating_add avoids overflow when k is usize::MAX.
        let mut heap: BinaryHeap<MaxHeapEntry> =
            BinaryHeap::with_capacity(k.saturating_add(1).min(1024));

        for (id, vector) in snapshot.iter() {
            let distance = metric.calculate(query, vector.as_slice());
            let entry = MaxHeapEntry { id, distance };

            if heap.len() < k {
                heap.push(entry);
            } else if let Some(worst) = heap.peek() {
                if entry.key(worst) == Ordering::Less {
                    heap.pop();
                    heap.push(entry);
                }
            }
        }

        let mut results: Vec<Neighbor> =
            heap.into_iter().map(|e| Neighbor::new(e.id, e.distance)).collect();
        results.sort_by(Neighbor::distance_then_id);

        Ok(Self { results })
    }

    /// Get the number of results found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if no results were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Get all results as a slice, ascending by `(distance, id)`.
    #[must_use]
    pub fn as_slice(&self) -> &[Neighbor] {
        &self.results
    }

    /// Consume the operator and return the sorted results.
    #[must_use]
    pub fn into_neighbors(self) -> Vec<Neighbor> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{BatchMode, IndexStore};
    use crate::types::VectorRecord;

    fn store_with(records: &[(i64, &[f32])]) -> IndexStore {
        let store = IndexStore::new();
        let batch: Vec<VectorRecord> = records
            .iter()
            .map(|(id, values)| VectorRecord::new(*id, values.to_vec()).unwrap())
            .collect();
        store.try_insert_batch(batch, BatchMode::InsertOnly).unwrap();
        store
    }

    #[test]
    fn empty_snapshot_returns_empty_for_any_k() {
        let store = IndexStore::new();
        let snapshot = store.snapshot().unwrap();

        let knn = ExactKnn::new(&snapshot, &[1.0], DistanceMetric::SquaredEuclidean, 5).unwrap();
        assert!(knn.is_empty());

        // Unset dimension: query length is not validated either.
        let knn =
            ExactKnn::new(&snapshot, &[1.0, 2.0, 3.0], DistanceMetric::SquaredEuclidean, 5)
                .unwrap();
        assert!(knn.is_empty());
    }

    #[test]
    fn k_zero_is_invalid() {
        let store = IndexStore::new();
        let snapshot = store.snapshot().unwrap();
        let result = ExactKnn::new(&snapshot, &[1.0], DistanceMetric::SquaredEuclidean, 0);
        assert!(matches!(result, Err(IndexError::InvalidK(0))));
    }

    #[test]
    fn squared_distances_in_order() {
        let store = store_with(&[(1, &[1.0]), (2, &[2.0]), (3, &[3.0])]);
        let snapshot = store.snapshot().unwrap();

        let knn = ExactKnn::new(&snapshot, &[1.0], DistanceMetric::SquaredEuclidean, 5).unwrap();
        let results = knn.into_neighbors();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], Neighbor::new(VectorId::new(1), 0.0));
        assert_eq!(results[1], Neighbor::new(VectorId::new(2), 1.0));
        assert_eq!(results[2], Neighbor::new(VectorId::new(3), 4.0));
    }

    #[test]
    fn k_smaller_than_record_count() {
        let store = store_with(&[(1, &[1.0]), (2, &[2.0]), (3, &[3.0]), (4, &[4.0])]);
        let snapshot = store.snapshot().unwrap();

        let knn = ExactKnn::new(&snapshot, &[0.0], DistanceMetric::SquaredEuclidean, 2).unwrap();
        let results = knn.as_slice();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, VectorId::new(1));
        assert_eq!(results[1].id, VectorId::new(2));
    }

    #[test]
    fn k_larger_than_record_count_returns_all() {
        let store = store_with(&[(1, &[1.0]), (2, &[2.0])]);
        let snapshot = store.snapshot().unwrap();

        let knn = ExactKnn::new(&snapshot, &[1.0], DistanceMetric::SquaredEuclidean, 10).unwrap();
        assert_eq!(knn.len(), 2);
    }

    #[test]
    fn equal_distances_tie_break_by_ascending_id() {
        // Ids 7 and 3 are equidistant from the query; 3 must come first.
        let store = store_with(&[(7, &[1.0, 0.0]), (3, &[-1.0, 0.0]), (5, &[0.0, 3.0])]);
        let snapshot = store.snapshot().unwrap();

        let knn =
            ExactKnn::new(&snapshot, &[0.0, 0.0], DistanceMetric::SquaredEuclidean, 3).unwrap();
        let results = knn.as_slice();

        assert_eq!(results[0].id, VectorId::new(3));
        assert_eq!(results[1].id, VectorId::new(7));
        assert_eq!(results[2].id, VectorId::new(5));
    }

    #[test]
    fn tie_break_holds_under_eviction() {
        // Three equidistant vectors, k = 2: the two smallest ids survive.
        let store = store_with(&[(9, &[1.0]), (4, &[1.0]), (6, &[1.0])]);
        let snapshot = store.snapshot().unwrap();

        let knn = ExactKnn::new(&snapshot, &[0.0], DistanceMetric::SquaredEuclidean, 2).unwrap();
        let results = knn.as_slice();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, VectorId::new(4));
        assert_eq!(results[1].id, VectorId::new(6));
    }

    #[test]
    fn query_dimension_mismatch_fails() {
        let store = store_with(&[(1, &[1.0, 2.0])]);
        let snapshot = store.snapshot().unwrap();

        let result = ExactKnn::new(&snapshot, &[1.0], DistanceMetric::SquaredEuclidean, 5);
        assert!(matches!(
            result,
            Err(IndexError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn prefixed_dimension_validates_against_empty_store() {
        let store = IndexStore::with_dimension(2).unwrap();
        let snapshot = store.snapshot().unwrap();

        let result = ExactKnn::new(&snapshot, &[1.0], DistanceMetric::SquaredEuclidean, 5);
        assert!(matches!(result, Err(IndexError::DimensionMismatch { .. })));

        let knn = ExactKnn::new(&snapshot, &[1.0, 2.0], DistanceMetric::SquaredEuclidean, 5)
            .unwrap();
        assert!(knn.is_empty());
    }

    #[test]
    fn cosine_metric_orders_by_direction() {
        let store = store_with(&[
            (1, &[1.0, 0.0]),  // same direction
            (2, &[0.0, 1.0]),  // orthogonal
            (3, &[-1.0, 0.0]), // opposite
        ]);
        let snapshot = store.snapshot().unwrap();

        let knn = ExactKnn::new(&snapshot, &[1.0, 0.0], DistanceMetric::Cosine, 3).unwrap();
        let results = knn.as_slice();

        assert_eq!(results[0].id, VectorId::new(1));
        assert!(results[0].distance < 1e-6);
        assert_eq!(results[1].id, VectorId::new(2));
        assert!((results[1].distance - 1.0).abs() < 1e-6);
        assert_eq!(results[2].id, VectorId::new(3));
        assert!((results[2].distance - 2.0).abs() < 1e-6);
    }
}
