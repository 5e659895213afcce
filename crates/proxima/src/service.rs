//! The index service: Describe, Search, Insert, Upsert.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use proxima_core::Neighbor;
use proxima_index::store::{BatchMode, BatchOutcome};
use proxima_index::{ExactKnn, IndexError, IndexStore, MutationCoordinator, VectorRecord};

use crate::config::IndexConfig;
use crate::error::Error;

/// Description of an index: how many records it holds and its dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescription {
    /// Number of records currently stored.
    pub record_count: usize,
    /// The fixed dimension, or `None` if no record has fixed it yet.
    pub dimension: Option<usize>,
}

/// A vector index service exposing four operations: `describe`, `search`,
/// `insert`, and `upsert`.
///
/// The service is a thin orchestration over the index engine: reads run
/// against published snapshots and never block behind writes; writes are
/// serialized through the mutation coordinator and apply atomically per
/// batch.
///
/// The handle is cheap to clone; clones share one store, so a process
/// hosts a single logical index regardless of how many callers hold the
/// service.
///
/// # Example
///
/// ```
/// use proxima::{IndexConfig, IndexService, VectorRecord};
///
/// let service = IndexService::new(IndexConfig::new()).unwrap();
///
/// let batch = vec![
///     VectorRecord::new(1, vec![1.0]).unwrap(),
///     VectorRecord::new(2, vec![2.0]).unwrap(),
/// ];
/// let outcome = service.insert(batch).unwrap();
/// assert_eq!(outcome.inserted, 2);
///
/// let hits = service.search(&[1.0], 5).unwrap();
/// assert_eq!(hits.len(), 2);
/// assert_eq!(hits[0].id.as_i64(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct IndexService {
    inner: Arc<ServiceInner>,
}

#[derive(Debug)]
struct ServiceInner {
    store: Arc<IndexStore>,
    coordinator: MutationCoordinator,
    config: IndexConfig,
}

impl IndexService {
    /// Create a new empty service from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fixes a zero dimension.
    pub fn new(config: IndexConfig) -> Result<Self, Error> {
        let store = match config.dimension {
            Some(dimension) => IndexStore::with_dimension(dimension)?,
            None => IndexStore::new(),
        };
        let store = Arc::new(store);
        let coordinator = MutationCoordinator::new(Arc::clone(&store));

        Ok(Self { inner: Arc::new(ServiceInner { store, coordinator, config }) })
    }

    /// Get the service configuration.
    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.inner.config
    }

    /// Describe the index: record count and dimension.
    ///
    /// A pure read against the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error only if a prior panic corrupted the store.
    pub fn describe(&self) -> Result<IndexDescription, Error> {
        let description = self.description()?;
        info!(record_count = description.record_count, "received describe request");
        Ok(description)
    }

    /// Read the current description without request-level logging; used
    /// by the sharded router for its internal bookkeeping.
    pub(crate) fn description(&self) -> Result<IndexDescription, Error> {
        let snapshot = self.inner.store.snapshot()?;
        Ok(IndexDescription {
            record_count: snapshot.count(),
            dimension: snapshot.dimension(),
        })
    }

    /// Search for the k nearest neighbors of the query vector.
    ///
    /// Results are ordered by ascending distance with ties broken by
    /// ascending id, and contain `min(k, record_count)` entries. An empty
    /// never-dimensioned index yields an empty result for any valid `k`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidK`] if `k` is zero,
    /// [`IndexError::EmptyQuery`] if the query has no coordinates,
    /// [`IndexError::InvalidValue`] if the query contains NaN/Infinite
    /// values, or [`IndexError::DimensionMismatch`] if the query length
    /// disagrees with the fixed dimension.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, Error> {
        info!(k, "received search request");

        if k == 0 {
            return Err(IndexError::InvalidK(k).into());
        }
        if query.is_empty() {
            return Err(IndexError::EmptyQuery.into());
        }
        for (index, &value) in query.iter().enumerate() {
            if !value.is_finite() {
                return Err(IndexError::InvalidValue {
                    index,
                    value,
                    reason: if value.is_nan() {
                        "NaN values are not allowed"
                    } else {
                        "Infinite values are not allowed"
                    },
                }
                .into());
            }
        }

        let snapshot = self.inner.store.snapshot()?;
        let knn = ExactKnn::new(&snapshot, query, self.inner.config.metric, k)?;

        info!(results = knn.len(), "search complete");
        Ok(knn.into_neighbors())
    }

    /// Insert a batch of new vectors.
    ///
    /// The batch applies atomically: if any id already exists (or repeats
    /// within the batch), or any vector disagrees with the fixed
    /// dimension, the whole batch fails and nothing is applied. The
    /// returned outcome always has `replaced == 0`.
    ///
    /// # Errors
    ///
    /// Propagates [`IndexError::DuplicateId`] and
    /// [`IndexError::DimensionMismatch`] unchanged.
    pub fn insert(&self, records: Vec<VectorRecord>) -> Result<BatchOutcome, Error> {
        info!(num_vectors = records.len(), "received insert request");

        let outcome = self.inner.coordinator.apply(records, BatchMode::InsertOnly)?;

        info!(inserted = outcome.inserted, "insert complete");
        Ok(outcome)
    }

    /// Insert or replace a batch of vectors.
    ///
    /// Existing ids are overwritten in place; new ids are added. Id
    /// collisions never fail the batch.
    ///
    /// # Errors
    ///
    /// Propagates [`IndexError::DimensionMismatch`] unchanged.
    pub fn upsert(&self, records: Vec<VectorRecord>) -> Result<BatchOutcome, Error> {
        info!(num_vectors = records.len(), "received upsert request");

        let outcome = self.inner.coordinator.apply(records, BatchMode::Upsert)?;

        info!(
            inserted = outcome.inserted,
            replaced = outcome.replaced,
            "upsert complete"
        );
        Ok(outcome)
    }
}
